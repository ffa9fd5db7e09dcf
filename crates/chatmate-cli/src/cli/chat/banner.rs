//! Welcome banner display for chat sessions.

use std::io::{self, Write};

use console::style;

/// Print the welcome banner at the start of a chat session.
///
/// Shows the bot title, a short introduction, and how to leave.
pub fn print_welcome_banner() {
    let rule = "=".repeat(50);

    println!("{rule}");
    println!(
        "🤖 {}",
        style("English Chatbot - Practice Your English!").cyan().bold()
    );
    println!("{rule}");
    println!("Hello! I'm here to help you practice English.");
    println!("We can chat about anything you'd like.");
    println!("Type 'bye', 'exit', or 'quit' to end our conversation.");
    println!("{}", "-".repeat(50));
}

/// Write the two-line diagnostic for a missing API credential.
pub fn write_missing_credential(out: &mut impl Write, var: &str) -> io::Result<()> {
    writeln!(out, "Error: {var} environment variable not found.")?;
    writeln!(out, "Please set your OpenAI API key in the environment or .env file.")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_lines() {
        let mut out = Vec::new();
        write_missing_credential(&mut out, "OPENAI_API_KEY").unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: OPENAI_API_KEY environment variable not found.\n\
             Please set your OpenAI API key in the environment or .env file.\n"
        );
    }
}
