use crate::ReviewCategory;
use crate::ReviewRequest;
use crate::llm::prompts;

pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Outcome of looking a category up in the template table.
///
/// The lookup never errors: categories without a dedicated template get the
/// generic instruction, tagged so callers can tell the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateLookup {
    Found(&'static str),
    Fallback(&'static str),
}

impl TemplateLookup {
    pub fn instruction(self) -> &'static str {
        match self {
            TemplateLookup::Found(s) | TemplateLookup::Fallback(s) => s,
        }
    }
}

pub fn lookup_template(category: &ReviewCategory) -> TemplateLookup {
    match category {
        ReviewCategory::Syntax => TemplateLookup::Found(prompts::SYNTAX),
        ReviewCategory::Optimization => TemplateLookup::Found(prompts::OPTIMIZATION),
        ReviewCategory::BestPractices => TemplateLookup::Found(prompts::BEST_PRACTICES),
        ReviewCategory::Security => TemplateLookup::Found(prompts::SECURITY),
        ReviewCategory::Other(_) => TemplateLookup::Fallback(prompts::GENERIC),
    }
}

/// Assemble the prompt for a review request.
///
/// The source text goes into the user prompt verbatim, no escaping; the
/// templates are plain instruction text, not a structured format.
pub fn review_prompt(request: &ReviewRequest) -> PromptPair {
    let instruction = lookup_template(&request.category).instruction();

    let user = format!(
        "{instruction}\n\n{source}",
        instruction = instruction,
        source = request.source
    );

    PromptPair {
        system: prompts::REVIEWER_PERSONA.to_owned(),
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(source: &str, label: &str) -> ReviewRequest {
        ReviewRequest {
            source: source.to_string(),
            category: ReviewCategory::parse(label),
        }
    }

    #[test]
    fn known_categories_embed_source_verbatim() {
        for label in ["syntax", "optimization", "best_practices", "security"] {
            let prompt = review_prompt(&request("fn main() { let x = 1; }", label));
            assert!(
                prompt.user.contains("fn main() { let x = 1; }"),
                "source missing for {label}"
            );
            assert!(!prompt.user.is_empty());
        }
    }

    #[test]
    fn unknown_category_falls_back_to_generic() {
        let lookup = lookup_template(&ReviewCategory::parse("readability"));
        assert_eq!(lookup, TemplateLookup::Fallback(prompts::GENERIC));

        let prompt = review_prompt(&request("x = 1", "readability"));
        assert!(prompt.user.starts_with(prompts::GENERIC));
        assert!(prompt.user.contains("x = 1"));
    }

    #[test]
    fn known_category_is_tagged_found() {
        let lookup = lookup_template(&ReviewCategory::Syntax);
        assert_eq!(lookup, TemplateLookup::Found(prompts::SYNTAX));
    }

    #[test]
    fn security_review_carries_instruction_and_code() {
        let prompt = review_prompt(&request("def f(): pass", "security"));
        assert!(prompt.user.contains("security vulnerabilities"));
        assert!(prompt.user.contains("def f(): pass"));
    }

    #[test]
    fn same_inputs_build_the_same_prompt() {
        let a = review_prompt(&request("let y = 2;", "optimization"));
        let b = review_prompt(&request("let y = 2;", "optimization"));
        assert_eq!(a.user, b.user);
        assert_eq!(a.system, b.system);
    }
}
