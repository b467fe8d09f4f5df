//! Article Approval Workflow
//!
//! This example declares two small workflows and drives them with the
//! reference engine.
//!
//! Key concepts:
//! - Declaring states and events (new -> approved)
//! - Repeated event names as ordered alternatives (pending -> failed | done)
//! - Specification-wide hooks and per-state entry hooks
//! - Graph validation and DOT rendering
//!
//! Run with: cargo run --example approval_workflow

use flowspec::builder::{EventOptions, Specification};
use flowspec::engine::Workflow;
use flowspec::render::{to_dot, DiagramOptions};
use std::error::Error;

// Article entity
struct Article {
    title: String,
    audit: Vec<String>,
}

// Task entity
struct Task {
    failed: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Article Approval Workflow ===\n");

    let articles = Specification::<Article>::build(|wf| {
        wf.after_transition(|article, info| {
            article
                .audit
                .push(format!("{} --{}--> {}", info.from, info.event, info.to));
            Ok(())
        });
        wf.state("new").event(
            "approve",
            EventOptions::transitions_to("approved").with_meta("display_name", "Approve article"),
        )?;
        wf.state("approved").on_entry(|article| {
            println!("  [Entry] '{}' is approved", article.title);
            Ok(())
        });
        Ok(())
    })?;

    println!("States: {}", articles.state_names().join(" -> "));
    println!("Valid graph: {}\n", articles.validate().is_success());

    let mut article = Article {
        title: "Release notes".to_string(),
        audit: Vec::new(),
    };
    let mut workflow = Workflow::new(&articles)?;

    for listing in workflow.current_state().events_list() {
        println!("Available: {} ({})", listing.display_name, listing.event);
    }
    workflow.fire("approve", &mut article)?;
    println!("Current state: {}", workflow.current_state());
    println!("Audit: {:?}\n", article.audit);

    println!("=== Task Completion ===\n");

    let tasks = Specification::<Task>::build(|wf| {
        wf.state("pending")
            .event("finish", EventOptions::transitions_to("failed").when(|t: &Task| t.failed))?
            .event("finish", EventOptions::transitions_to("done"))?;
        wf.state("done");
        wf.state("failed");
        Ok(())
    })?;

    for failed in [false, true] {
        let mut task = Task { failed };
        let mut workflow = Workflow::new(&tasks)?;
        workflow.fire("finish", &mut task)?;
        println!(
            "failed = {failed}: pending -> {} (terminal: {})",
            workflow.current_state(),
            workflow.is_terminal()
        );
    }

    println!("\nDiagram:\n{}", to_dot(&tasks, &DiagramOptions::for_workflow("tasks")));

    println!("Key Takeaways:");
    println!("- The first declared state is the initial state");
    println!("- Alternatives under one event name are tried in declaration order");
    println!("- One specification can drive many workflow instances");

    println!("\n=== Example Complete ===");
    Ok(())
}
