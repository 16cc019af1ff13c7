//! Degradation commands: health, status, feature, lock, unlock, reset

use anyhow::Result;
use colored::{ColoredString, Colorize};
use std::collections::BTreeMap;

use super::{print_json, Context};
use crate::degradation::{ComponentId, DegradationLevel, HealthStatus, SystemState, FEATURES};

fn paint_level(level: DegradationLevel) -> ColoredString {
    let name = level.name();
    match level {
        DegradationLevel::Full => name.green().bold(),
        DegradationLevel::Reduced => name.yellow().bold(),
        DegradationLevel::Manual => name.bright_yellow().bold(),
        DegradationLevel::Safe => name.red().bold(),
        DegradationLevel::Recovery => name.magenta().bold(),
    }
}

fn print_components(components: &BTreeMap<ComponentId, HealthStatus>) {
    if components.is_empty() {
        println!("  {} No health checks recorded", "−".dimmed());
        return;
    }
    for (id, status) in components {
        let icon = if status.healthy {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };
        let mut line = format!("  {icon} {:<13} {}", id.as_str(), status.message);
        if status.recovery_attempted {
            let outcome = if status.recovery_succeeded {
                "recovery succeeded".green()
            } else {
                "recovery failed".red()
            };
            line.push_str(&format!(" ({outcome})"));
        }
        println!("{line}");
    }
}

fn print_state(state: &SystemState) {
    println!(
        "{} {} ({})",
        "Degradation level:".bold(),
        paint_level(state.level),
        state.level.description()
    );
    if !state.transition_reason.is_empty() {
        println!(
            "  Since {}: {}",
            state.last_transition.format("%Y-%m-%d %H:%M:%S UTC"),
            state.transition_reason
        );
    }
    if state.locked {
        println!("  {} {}", "Locked:".yellow().bold(), state.lock_reason);
    }
    println!("\n{}", "Components:".bold());
    print_components(&state.components);
}

/// Run health checks and report the resulting level.
///
/// Fails when the tracker is down and the project configures `fail` for an
/// unavailable tracker.
pub fn health(ctx: &Context, json: bool) -> Result<bool> {
    let state = ctx.engine().run_health_checks();

    if json {
        print_json(&state)?;
    } else {
        print_state(&state);
    }

    let proceed = match state.components.get(&ComponentId::TaskTracker) {
        Some(tracker) if !tracker.healthy => ctx.config.degradation.on_tracker_unavailable.handle(
            &format!("Task tracker {} unavailable: {}", ctx.config.task_tracker, tracker.message),
        ),
        _ => true,
    };
    Ok(proceed)
}

/// Show the persisted state without probing.
pub fn status(ctx: &Context, json: bool) -> Result<bool> {
    let report = ctx.engine().status_report();
    if json {
        print_json(&report)?;
        return Ok(true);
    }

    println!(
        "{} {} ({})",
        "Degradation level:".bold(),
        paint_level(report.level),
        report.level_description
    );
    if !report.transition_reason.is_empty() {
        println!("  Reason: {}", report.transition_reason);
    }
    if report.locked {
        println!("  {} {}", "Locked:".yellow().bold(), report.lock_reason);
    }

    println!("\n{}", "Components:".bold());
    print_components(&report.components);

    println!("\n{}", "Features:".bold());
    for (name, _) in FEATURES {
        let available = report.available_features.get(*name).copied().unwrap_or(false);
        let icon = if available {
            "✓".green().bold()
        } else {
            "✗".dimmed()
        };
        println!("  {icon} {name}");
    }
    Ok(true)
}

/// Exit status answers whether `name` is usable at the current level.
pub fn feature(ctx: &Context, name: &str) -> Result<bool> {
    let level = ctx.engine().current_level();
    let available = crate::degradation::feature_available(level, name);
    if available {
        println!("{} {name} is available at {}", "✓".green().bold(), paint_level(level));
    } else {
        println!("{} {name} is disabled at {}", "✗".red().bold(), paint_level(level));
    }
    Ok(available)
}

pub fn lock(ctx: &Context, reason: &str) -> Result<bool> {
    let state = ctx.engine().lock(reason)?;
    println!(
        "{} Level locked at {}: {reason}",
        "✓".green().bold(),
        paint_level(state.level)
    );
    Ok(true)
}

pub fn unlock(ctx: &Context) -> Result<bool> {
    let state = ctx.engine().unlock()?;
    println!(
        "{} Level unlocked (currently {})",
        "✓".green().bold(),
        paint_level(state.level)
    );
    Ok(true)
}

pub fn reset(ctx: &Context) -> Result<bool> {
    ctx.engine().reset_to_full()?;
    println!(
        "{} Degradation state reset to {}",
        "✓".green().bold(),
        paint_level(DegradationLevel::Full)
    );
    Ok(true)
}
