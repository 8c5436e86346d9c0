// Prompt constants for the content requester.

/// Directive appended to every user prompt. Presentation tuning only; override
/// with `LABGEN_FORMAT_INSTRUCTION`.
pub const FORMAT_INSTRUCTION: &str =
    "Write the implementation as well-formatted multi-line code with proper indentation.";

/// Joins the user's prompt and the formatting directive into the text sent to the model.
pub fn build_prompt(user_prompt: &str, instruction: &str) -> String {
    let user_prompt = user_prompt.trim();
    let instruction = instruction.trim();
    match (user_prompt.is_empty(), instruction.is_empty()) {
        (_, true) => user_prompt.to_string(),
        (true, false) => instruction.to_string(),
        (false, false) => format!("{user_prompt}\n\n{instruction}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_appends_instruction_after_blank_line() {
        let prompt = build_prompt("Explain single inheritance in Java", FORMAT_INSTRUCTION);
        assert!(prompt.starts_with("Explain single inheritance in Java\n\n"));
        assert!(prompt.ends_with(FORMAT_INSTRUCTION));
    }

    #[test]
    fn test_build_prompt_with_empty_user_prompt_is_instruction_only() {
        assert_eq!(build_prompt("   ", FORMAT_INSTRUCTION), FORMAT_INSTRUCTION);
    }

    #[test]
    fn test_build_prompt_with_empty_instruction() {
        assert_eq!(build_prompt(" Loops in C ", ""), "Loops in C");
    }
}
