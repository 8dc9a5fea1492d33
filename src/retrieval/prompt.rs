//! Prompt assembly from retrieved examples.
//!
//! Examples are rendered in rank order until the token budget would be exceeded
//! (the top example is always kept), each with a tail of its dialog context.

use crate::retrieval::index::Neighbor;
use crate::store::types::ExamplePair;
use crate::translator::types::Direction;

/// Limits applied while rendering examples.
#[derive(Debug, Clone, Copy)]
pub struct PromptLimits {
    /// Approximate token budget for the rendered examples (chars / 4).
    pub token_budget: usize,
    /// Trailing context lines rendered per example.
    pub context_lines: usize,
}

impl Default for PromptLimits {
    fn default() -> Self {
        Self {
            token_budget: 2000,
            context_lines: 8,
        }
    }
}

/// A chat prompt ready for the generation capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    /// How many retrieved examples made it into `user`.
    pub examples_used: usize,
}

struct Wording {
    system: &'static str,
    preamble: &'static str,
    source_label: &'static str,
    target_label: &'static str,
    text_label: &'static str,
    answer_label: &'static str,
}

fn wording(direction: Direction) -> Wording {
    match direction {
        Direction::ToPlain => Wording {
            system: "Jesteś korpotłumaczem, który tłumaczy korporacyjną nowomowę na prosty \
                     język ludzki. Twoje tłumaczenia są bezkompromisowe i pokazują prawdziwą \
                     intencję wypowiedzi.",
            preamble: "Przetłumacz korpomowę na prosty język ludzki.\n\
                       Bądź bezpośredni i szczery jak korpotłumacz w przykładach.",
            source_label: "Korpomowa",
            target_label: "Tłumaczenie",
            text_label: "Korpomowa do przetłumaczenia",
            answer_label: "Tłumaczenie (uwzględniając podany kontekst):",
        },
        Direction::ToCorporate => Wording {
            system: "Jesteś korpotłumaczem, który przekształca proste wypowiedzi w \
                     profesjonalną korpomowę.",
            preamble: "Przetłumacz prosty tekst na korpomowę.\n\
                       Używaj profesjonalnego, korporacyjnego języka.",
            source_label: "Ludzki język",
            target_label: "Korpomowa",
            text_label: "Tekst do przetłumaczenia",
            answer_label: "Korpomowa (uwzględniając podany kontekst):",
        },
    }
}

pub fn estimate_tokens(text: &str) -> usize {
    text.len() / 4
}

fn render_example(
    example: &ExamplePair,
    direction: Direction,
    words: &Wording,
    context_lines: usize,
) -> String {
    let mut out = String::new();
    let tail = &example.context[example.context.len().saturating_sub(context_lines)..];
    if !tail.is_empty() {
        out.push_str("Kontekst rozmowy:\n");
        for line in tail {
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str(&format!(
        "{}: {}\n{}: {}",
        words.source_label,
        example.utterance(direction.source()),
        words.target_label,
        example.utterance(direction.target()),
    ));
    out
}

/// Build the translation prompt: preamble, examples, situation context, text.
pub fn build_prompt(
    direction: Direction,
    neighbors: &[Neighbor],
    context: Option<&str>,
    text: &str,
    limits: PromptLimits,
) -> Prompt {
    let words = wording(direction);

    let mut rendered: Vec<String> = Vec::new();
    let mut token_sum = 0usize;
    for neighbor in neighbors {
        let block = render_example(&neighbor.example, direction, &words, limits.context_lines);
        let tokens = estimate_tokens(&block);
        if !rendered.is_empty() && token_sum + tokens > limits.token_budget {
            break;
        }
        token_sum += tokens;
        rendered.push(block);
    }

    let mut user = format!("{}\n\nPrzykłady:\n", words.preamble);
    if rendered.is_empty() {
        user.push_str("(brak przykładów)");
    } else {
        user.push_str(&rendered.join("\n\n"));
    }
    if let Some(ctx) = context.map(str::trim).filter(|c| !c.is_empty()) {
        user.push_str(&format!("\n\nKontekst obecnej sytuacji: {ctx}"));
    }
    user.push_str(&format!(
        "\n\n{}: {}\n\n{}",
        words.text_label, text, words.answer_label
    ));

    Prompt {
        system: words.system.to_string(),
        user,
        examples_used: rendered.len(),
    }
}

/// Prompt asking for a short label describing a finished translation.
pub fn name_prompt(original: &str, translation: &str, context: Option<&str>) -> String {
    format!(
        "Create a short, unique name for the translation. The name should be concise \
         (max few words) and should consider the original text, translation, and context.\n\
         It can be humorous or creative, referencing the corporate speak and simple language style.\n\n\
         Original text: \"{original}\"\n\
         Translation: \"{translation}\"\n\
         Context: \"{}\"\n\n\
         Translation name:",
        context.unwrap_or("")
    )
}

/// Label used when name generation fails or is disabled.
pub fn fallback_name(original: &str) -> String {
    let head: String = original.chars().take(20).collect();
    format!("Translation_{head}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbor(source: &str, target: &str, context: &[&str]) -> Neighbor {
        Neighbor {
            position: 0,
            distance: 0.0,
            example: ExamplePair {
                source_utterance: source.into(),
                target_utterance: target.into(),
                context: context.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    #[test]
    fn to_plain_renders_corporate_first() {
        let n = neighbor(
            "Potrzebuję to na EOD",
            "To jest pilne",
            &["[Pracodawca]: Potrzebuję to na EOD", "[Korpotłumacz]: To jest pilne"],
        );
        let prompt = build_prompt(
            Direction::ToPlain,
            &[n],
            None,
            "Zróbmy quick sync",
            PromptLimits::default(),
        );
        assert_eq!(prompt.examples_used, 1);
        assert!(prompt.user.starts_with("Przetłumacz korpomowę"));
        assert!(prompt.user.contains(
            "Kontekst rozmowy:\n[Pracodawca]: Potrzebuję to na EOD\n[Korpotłumacz]: To jest pilne\n\
             Korpomowa: Potrzebuję to na EOD\nTłumaczenie: To jest pilne"
        ));
        assert!(prompt.user.contains("Korpomowa do przetłumaczenia: Zróbmy quick sync"));
        assert!(!prompt.user.contains("Kontekst obecnej sytuacji"));
    }

    #[test]
    fn to_corporate_renders_plain_first() {
        let n = neighbor("Domknijmy temat", "Skończmy to", &[]);
        let prompt = build_prompt(
            Direction::ToCorporate,
            &[n],
            Some("Rozmowa w biurze"),
            "Spotkajmy się",
            PromptLimits::default(),
        );
        assert!(prompt.user.contains("Ludzki język: Skończmy to\nKorpomowa: Domknijmy temat"));
        assert!(!prompt.user.contains("Kontekst rozmowy"));
        let ctx_at = prompt.user.find("Kontekst obecnej sytuacji: Rozmowa w biurze").unwrap();
        let text_at = prompt.user.find("Tekst do przetłumaczenia: Spotkajmy się").unwrap();
        let examples_at = prompt.user.find("Przykłady:").unwrap();
        assert!(examples_at < ctx_at && ctx_at < text_at);
    }

    #[test]
    fn context_lines_are_limited_to_tail() {
        let lines: Vec<String> = (0..20).map(|i| format!("[X]: linia {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let prompt = build_prompt(
            Direction::ToPlain,
            &[neighbor("a", "b", &refs)],
            None,
            "q",
            PromptLimits {
                token_budget: 10_000,
                context_lines: 2,
            },
        );
        assert!(prompt.user.contains("[X]: linia 18\n[X]: linia 19\n"));
        assert!(!prompt.user.contains("linia 17"));
    }

    #[test]
    fn budget_drops_later_examples_but_keeps_first() {
        let long = "słowo ".repeat(200);
        let neighbors = vec![
            neighbor(&long, "b", &[]),
            neighbor("second", "c", &[]),
        ];
        let prompt = build_prompt(
            Direction::ToPlain,
            &neighbors,
            None,
            "q",
            PromptLimits {
                token_budget: 10,
                context_lines: 0,
            },
        );
        assert_eq!(prompt.examples_used, 1);
        assert!(!prompt.user.contains("second"));
    }

    #[test]
    fn no_examples_still_builds_prompt() {
        let prompt = build_prompt(Direction::ToPlain, &[], None, "q", PromptLimits::default());
        assert_eq!(prompt.examples_used, 0);
        assert!(prompt.user.contains("(brak przykładów)"));
    }

    #[test]
    fn fallback_name_truncates_on_char_boundary() {
        assert_eq!(fallback_name("krótko"), "Translation_krótko");
        let name = fallback_name("Zażółć gęślą jaźń i jeszcze więcej");
        assert_eq!(name, "Translation_Zażółć gęślą jaźń i ");
    }

    #[test]
    fn name_prompt_mentions_all_parts() {
        let p = name_prompt("orig", "trans", Some("ctx"));
        assert!(p.contains("Original text: \"orig\""));
        assert!(p.contains("Translation: \"trans\""));
        assert!(p.contains("Context: \"ctx\""));
    }
}
