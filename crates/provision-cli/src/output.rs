//! Colored, prefixed console lines

use colored::Colorize;

pub fn banner(title: &str) {
    let rule = "=".repeat(50);
    println!("{}", rule.cyan());
    println!("{}", title.bold());
    println!("{}", rule.cyan());
}

pub fn step(message: &str) {
    println!("{} {}", "=>".blue().bold(), message);
}

pub fn ok(message: &str) {
    println!("{} {}", "OK".green().bold(), message);
}

pub fn warn(message: &str) {
    println!("{} {}", "WARN".yellow().bold(), message);
}

pub fn fail(message: &str) {
    println!("{} {}", "FAIL".red().bold(), message);
}

pub fn detail(message: &str) {
    println!("   {}", message.dimmed());
}
