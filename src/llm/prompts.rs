pub const REVIEWER_PERSONA: &str = r#"You are a code review assistant.
Rules:
- Answer with the review only; do not narrate your thought process.
- Organize findings as bullet points, most important first.
- Enclose functions, identifiers, and filenames with `ticks`.
- Point at concrete lines or constructs; avoid generic advice like 'add tests'
  unless the code genuinely lacks them.
- If the code looks fine for the requested review, say so briefly instead of
  inventing problems."#;

pub const SYNTAX: &str =
    "Please analyze the following code for any syntax errors and suggest improvements:";

pub const OPTIMIZATION: &str =
    "Please analyze the following code and suggest optimizations for performance improvements:";

pub const BEST_PRACTICES: &str =
    "Please analyze the following code and suggest improvements according to best practices:";

pub const SECURITY: &str =
    "Please analyze the following code for any security vulnerabilities and provide suggestions:";

pub const GENERIC: &str = "Please analyze the following code:";
