//! Action Button
//!
//! This demo walks an action button through a fast save that succeeds and a
//! slow save that does not, printing what the host would draw at each step.
//!
//! Key concepts:
//! - A fast operation still shows the spinner for the minimum duration
//! - The success tick is shown for a fixed duration
//! - The button keeps its pre-swap size while an icon is shown
//!
//! Run with: RUST_LOG=action_feedback=debug cargo run --example action_button

use action_feedback::button::{ActionButton, Appearance};
use action_feedback::controller::{FeedbackController, Input};
use action_feedback::core::{Footprint, FootprintError, ManualClock};
use tracing_subscriber::EnvFilter;

fn print_frame(clock: &ManualClock, button: &ActionButton, controller: &FeedbackController<ManualClock>) {
    let render = controller.render();
    let view = button.view(&render);
    let content = match &view.icon {
        Some(icon) => format!("[{}] {}", icon.name, icon.label),
        None => "Save".to_string(),
    };
    let size = match view.size {
        Some(size) => format!("{}x{}", size.width(), size.height()),
        None => "natural".to_string(),
    };
    println!(
        "t={:>5}ms  {:<8} {:<40} size={:<9} class=\"{}\"",
        clock.elapsed_ms(),
        render.state.name(),
        content,
        size,
        view.class_attr()
    );
}

fn main() -> Result<(), FootprintError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let clock = ManualClock::at_epoch();
    let button = ActionButton::new(Appearance::Positive);
    let mut controller = FeedbackController::new(clock.clone());
    let natural = Footprint::new(36.0, 88.0)?;

    println!("=== Fast save that succeeds ===");
    controller.update(Input::new(true, false), || natural);
    print_frame(&clock, &button, &controller);

    clock.set_ms(120);
    controller.update(Input::new(false, true), || natural);
    print_frame(&clock, &button, &controller);

    for ms in [399, 400, 2399, 2400] {
        clock.set_ms(ms);
        controller.advance();
        print_frame(&clock, &button, &controller);
    }

    println!("\n=== Slow save that fails ===");
    clock.set_ms(3000);
    controller.update(Input::new(true, false), || natural);
    print_frame(&clock, &button, &controller);

    clock.set_ms(3900);
    controller.update(Input::new(false, false), || natural);
    print_frame(&clock, &button, &controller);

    println!("\n=== Snapshot ===");
    match controller.snapshot().to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("snapshot failed: {e}"),
    }

    Ok(())
}
