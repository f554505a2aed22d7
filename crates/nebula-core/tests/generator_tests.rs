// Tests for fire-and-forget palette generation.

use nebula_core::*;
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

const EMBER: &str = r##"{"name":"Ember","start":"#200000","mid":"#FF4500","end":"#FFE4B5"}"##;

/// Answers every prompt with a fixed payload or failure.
struct Canned(Result<&'static str, &'static str>);

impl PaletteService for Canned {
    fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        match self.0 {
            Ok(text) => Ok(text.to_string()),
            Err(reason) => Err(anyhow::anyhow!(reason)),
        }
    }
}

/// Holds each request until the test lets it through.
struct Gated(Mutex<Receiver<()>>);

impl PaletteService for Gated {
    fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        self.0.lock().unwrap().recv()?;
        Ok(EMBER.to_string())
    }
}

fn wait_for_outcome(
    generator: &mut ThemeGenerator,
    resolver: &mut ThemeResolver,
) -> Option<Result<(), GenerateError>> {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if let Some(outcome) = generator.poll(resolver) {
            return Some(outcome);
        }
        thread::sleep(Duration::from_millis(5));
    }
    None
}

#[test]
fn disabled_generator_rejects_requests() {
    let mut generator = ThemeGenerator::disabled();
    assert!(!generator.is_enabled());
    assert!(matches!(generator.submit("stormy sea"), Err(GenerateError::Disabled)));
    assert_eq!(generator.status(), GenerationStatus::Idle);
}

#[test]
fn blank_prompt_is_rejected() {
    let mut generator = ThemeGenerator::new(Some(Arc::new(Canned(Ok(EMBER)))));
    assert!(matches!(generator.submit("   "), Err(GenerateError::EmptyPrompt)));
    assert_eq!(generator.status(), GenerationStatus::Idle);
}

#[test]
fn successful_generation_installs_the_palette() {
    let mut generator = ThemeGenerator::new(Some(Arc::new(Canned(Ok(EMBER)))));
    let mut resolver = ThemeResolver::default();
    generator.submit("warm embers").unwrap();
    let outcome = wait_for_outcome(&mut generator, &mut resolver).expect("no outcome");
    assert!(outcome.is_ok());
    assert_eq!(generator.status(), GenerationStatus::Success);
    assert_eq!(resolver.active().label, "Ember");
    assert!(!generator.is_busy());
    // the outcome is delivered once
    assert!(generator.poll(&mut resolver).is_none());
}

#[test]
fn service_failure_leaves_the_theme_unchanged() {
    let mut generator = ThemeGenerator::new(Some(Arc::new(Canned(Err("network unreachable")))));
    let mut resolver = ThemeResolver::default();
    let before = resolver.active().clone();
    generator.submit("anything").unwrap();
    let outcome = wait_for_outcome(&mut generator, &mut resolver).expect("no outcome");
    assert!(matches!(outcome, Err(GenerateError::Service(_))));
    assert_eq!(generator.status(), GenerationStatus::Error);
    assert_eq!(resolver.active(), &before);
}

#[test]
fn malformed_palette_leaves_the_theme_unchanged() {
    let payload = r##"{"name":"Broken","start":"#12","mid":"#00FF00","end":"#FFFFFF"}"##;
    let mut generator = ThemeGenerator::new(Some(Arc::new(Canned(Ok(payload)))));
    let mut resolver = ThemeResolver::default();
    let before = resolver.active().clone();
    generator.submit("broken").unwrap();
    let outcome = wait_for_outcome(&mut generator, &mut resolver).expect("no outcome");
    assert!(matches!(outcome, Err(GenerateError::Theme(ThemeError::InvalidHex(_)))));
    assert_eq!(generator.status(), GenerationStatus::Error);
    assert_eq!(resolver.active(), &before);
}

#[test]
fn second_request_is_rejected_while_one_is_in_flight() {
    let (release, gate) = mpsc::channel();
    let mut generator = ThemeGenerator::new(Some(Arc::new(Gated(Mutex::new(gate)))));
    let mut resolver = ThemeResolver::default();

    generator.submit("first").unwrap();
    assert!(generator.is_busy());
    assert_eq!(generator.status(), GenerationStatus::Generating);
    assert!(matches!(generator.submit("second"), Err(GenerateError::Busy)));

    release.send(()).unwrap();
    let outcome = wait_for_outcome(&mut generator, &mut resolver).expect("no outcome");
    assert!(outcome.is_ok());

    // a new request is accepted once the first has finished
    generator.submit("third").unwrap();
    release.send(()).unwrap();
    assert!(wait_for_outcome(&mut generator, &mut resolver).is_some());
}

#[test]
fn finished_request_stays_busy_until_collected() {
    let mut generator = ThemeGenerator::new(Some(Arc::new(Canned(Ok(EMBER)))));
    let mut resolver = ThemeResolver::default();
    generator.submit("warm embers").unwrap();

    // give the worker time to publish without collecting its outcome
    thread::sleep(Duration::from_millis(200));
    assert!(generator.is_busy());
    assert_eq!(generator.status(), GenerationStatus::Generating);
    assert!(matches!(generator.submit("cold ash"), Err(GenerateError::Busy)));

    let outcome = wait_for_outcome(&mut generator, &mut resolver).expect("no outcome");
    assert!(outcome.is_ok());
    assert!(!generator.is_busy());
    assert_eq!(resolver.active().label, "Ember");
    generator.submit("cold ash").unwrap();
    assert!(wait_for_outcome(&mut generator, &mut resolver).is_some());
}

#[test]
fn prompt_and_schema_describe_the_palette() {
    let prompt = palette_prompt("  misty forest at dawn ");
    assert!(prompt.contains("\"misty forest at dawn\""));
    assert!(prompt.contains("3-color gradient"));

    let schema = palette_schema();
    let required: Vec<&str> = schema["required"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(required, ["name", "start", "mid", "end"]);
    assert_eq!(schema["properties"]["mid"]["type"], "STRING");
}

#[test]
fn request_palette_parses_service_text() {
    let palette = request_palette(&Canned(Ok(EMBER)), "embers").unwrap();
    assert_eq!(palette.name, "Ember");
    assert_eq!(palette.mid, "#FF4500");
}
