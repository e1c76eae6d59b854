//! User input utilities for interactive command-line prompts.

use anyhow::{Context, Result};
use std::io::{self, BufRead};

/// Prompts the user for a string input.
///
/// Returns the line read from stdin with whitespace trimmed.
pub fn prompt_string(prompt: &str) -> Result<String> {
    println!("{prompt}: ");
    read_trimmed_line(&mut io::stdin().lock())
}

/// Prompts the user for a yes/no confirmation. Defaults to no.
pub fn prompt_confirmation(prompt: &str) -> Result<bool> {
    loop {
        let input = prompt_string(&format!("{prompt} (y/N)"))?;
        match parse_confirmation(&input) {
            Some(answer) => return Ok(answer),
            None => eprintln!("Please enter 'y' for yes or 'n' for no."),
        }
    }
}

fn read_trimmed_line(reader: &mut impl BufRead) -> Result<String> {
    let mut input = String::new();
    reader
        .read_line(&mut input)
        .context("Failed to read user input")?;
    Ok(input.trim().to_string())
}

fn parse_confirmation(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" | "" => Some(false),
        _ => None,
    }
}
