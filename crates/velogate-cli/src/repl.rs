//! REPL – Read-Eval-Print Loop for the VeloGate teleop console.
//!
//! Key map:
//!   w / s        – drive forward / backward
//!   a / d        – rotate counter-clockwise / clockwise
//!   x            – stop
//!   i / k        – raise / lower the linear speed target
//!   j / l        – lower / raise the angular speed target
//!   speed        – show the current speed targets
//!   help         – show this list
//!   quit | exit  – leave the console

use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use velogate_runtime::CommandInterface;

/// Entry point for the interactive REPL.
///
/// `shutdown` is polled each iteration; when set the REPL exits cleanly.
pub fn run(operator: &CommandInterface, shutdown: Arc<AtomicBool>) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        print!("{} ", "velogate>".bold().cyan());
        stdout.flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("{}: {}", "Read error".red(), e);
                break;
            }
        }

        let cmd = line.trim();
        if cmd.is_empty() {
            continue;
        }

        match cmd {
            "w" => {
                operator.move_forward();
                println!("  {}", "forward".green());
            }
            "s" => {
                operator.move_backward();
                println!("  {}", "backward".green());
            }
            "a" => {
                operator.rotate_counter_clockwise();
                println!("  {}", "rotate left".green());
            }
            "d" => {
                operator.rotate_clockwise();
                println!("  {}", "rotate right".green());
            }
            "x" => {
                operator.stop();
                println!("  {}", "stop".yellow());
            }
            "i" => {
                operator.increase_linear_speed();
                print_targets(operator);
            }
            "k" => {
                operator.decrease_linear_speed();
                print_targets(operator);
            }
            "l" => {
                operator.increase_angular_speed();
                print_targets(operator);
            }
            "j" => {
                operator.decrease_angular_speed();
                print_targets(operator);
            }
            "speed" => print_targets(operator),
            "help" => cmd_help(),
            "quit" | "exit" => {
                println!("{}", "Goodbye.".green());
                shutdown.store(true, Ordering::SeqCst);
                break;
            }
            other => {
                println!(
                    "{} '{}'. Type {} for the key map.",
                    "Unknown command:".red(),
                    other.yellow(),
                    "help".bold()
                );
            }
        }
    }
}

fn print_targets(operator: &CommandInterface) {
    let target = operator.target_speed();
    println!(
        "  targets: linear {} m/s, angular {} rad/s",
        format!("{:.2}", target.linear).yellow(),
        format!("{:.2}", target.angular).yellow()
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Command handlers
// ─────────────────────────────────────────────────────────────────────────────

fn cmd_help() {
    println!();
    println!("{}", "VeloGate Keys".bold().underline());
    println!("  {}     – drive forward / backward",            "w  s".bold().cyan());
    println!("  {}     – rotate counter-clockwise / clockwise", "a  d".bold().cyan());
    println!("  {}        – stop",                              "x".bold().cyan());
    println!("  {}     – raise / lower linear speed target",   "i  k".bold().cyan());
    println!("  {}     – raise / lower angular speed target",  "l  j".bold().cyan());
    println!("  {}    – show current speed targets",           "speed".bold().cyan());
    println!("  {} – leave the console",                       "quit  exit".bold().cyan());
    println!();
    println!(
        "  {}",
        "Motion stops by itself when no key arrives within the watchdog window.".dimmed()
    );
    println!();
}
