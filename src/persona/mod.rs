//! Behavioral personas for group-discussion agents.
//!
//! Each agent attached to a call is assigned one of a small fixed set of
//! personas, chosen purely from its user id so repeated attach requests for
//! the same agent always land on the same persona.

/// A named behavioral profile applied to an agent's prompt.
#[derive(Debug)]
pub struct Persona {
    pub name: &'static str,
    pub description: &'static str,
    pub instructions: &'static [&'static str],
}

pub const PERSONAS: [Persona; 3] = [
    Persona {
        name: "Eager Contributor",
        description: "You are enthusiastic and quick to offer ideas, sometimes needing gentle \
                      reminders to let others speak. You build on ideas positively.",
        instructions: &[
            "Offer your own ideas related to the topic relatively quickly, but try not to interrupt.",
            "Actively agree with and build upon good points made by others ('Great point, Alex!', 'Adding to that...').",
            "If there's silence, be the first to jump in with a relevant thought or question.",
            "Remember to pause occasionally to let others contribute.",
        ],
    },
    Persona {
        name: "Cautious Analyst",
        description: "You are thoughtful and tend to analyze potential problems or edge cases. \
                      You ask clarifying questions.",
        instructions: &[
            "Listen carefully to proposed ideas first.",
            "Ask clarifying questions about the details or potential challenges ('How would we handle X?', 'What are the assumptions there?').",
            "Offer alternative perspectives or point out potential edge cases constructively ('One thing to consider is...', 'What about the scenario where...?').",
            "Ensure your points are well-reasoned.",
        ],
    },
    Persona {
        name: "Quiet Observer",
        description: "You are generally quiet, preferring to listen, but offer insightful \
                      comments when prompted or when you have a strong point. You encourage others.",
        instructions: &[
            "Listen attentively to the entire discussion.",
            "Speak up primarily when you have a unique insight, a summary point, or if directly asked.",
            "Encourage quieter participants if appropriate ('Alex, did you have any thoughts on that point?').",
            "Use phrases like 'That's an interesting perspective' or 'I agree with that approach'.",
        ],
    },
];

/// Map an agent user id to a persona by summing char codes modulo the
/// persona count. Total over all strings: the sum wraps rather than
/// overflowing on long ids, and the empty string maps to the first persona.
pub fn select(agent_user_id: &str) -> &'static Persona {
    let hash = agent_user_id
        .chars()
        .fold(0u32, |acc, c| acc.wrapping_add(c as u32));
    &PERSONAS[(hash as usize) % PERSONAS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_deterministic() {
        for id in ["default-group-bot", "agent-7", "lucy", "参加者"] {
            let first = select(id).name;
            for _ in 0..10 {
                assert_eq!(select(id).name, first);
            }
        }
    }

    #[test]
    fn test_single_char_buckets() {
        // 'a' is 97, 97 % 3 == 1
        assert_eq!(select("a").name, PERSONAS[1].name);
        // 'b' is 98, 98 % 3 == 2
        assert_eq!(select("b").name, PERSONAS[2].name);
        // 'c' is 99, 99 % 3 == 0
        assert_eq!(select("c").name, PERSONAS[0].name);
    }

    #[test]
    fn test_empty_id_maps_to_first_persona() {
        assert_eq!(select("").name, PERSONAS[0].name);
    }

    #[test]
    fn test_sum_wraps_naturally() {
        // "ab" sums to 195, 195 % 3 == 0
        assert_eq!(select("ab").name, PERSONAS[0].name);
    }

    #[test]
    fn test_long_identity_does_not_overflow() {
        // Agent ids come straight from request bodies; an id long enough to
        // overflow the running sum must still select deterministically.
        let id = "\u{10FFFF}".repeat(4000);
        let first = select(&id).name;
        assert_eq!(select(&id).name, first);

        let ascii = "x".repeat(100_000);
        assert_eq!(select(&ascii).name, select(&ascii).name);
    }

    #[test]
    fn test_every_persona_has_instructions() {
        for persona in &PERSONAS {
            assert!(!persona.name.is_empty());
            assert!(!persona.description.is_empty());
            assert!(!persona.instructions.is_empty());
        }
    }
}
