//! Prompt-injection keyword filter.
//!
//! Runs before any provider call. Matching is deliberately broad: literal
//! substrings, case-insensitive, no word boundaries, so over-blocking is
//! preferred to letting an injection phrase through inside a longer
//! sentence.

use aho_corasick::AhoCorasick;

/// Phrases that block a message outright.
const FORBIDDEN_PHRASES: &[&str] = &[
    "ignore previous",
    "ignore all instructions",
    "disregard previous",
    "system prompt",
    "jailbreak",
    "act as",
    "developer message",
    "developer mode",
    "openai policy",
];

/// Outcome of a guard inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardVerdict {
    Clear,
    Blocked { pattern: &'static str },
}

pub struct PromptGuard {
    automaton: AhoCorasick,
}

impl PromptGuard {
    pub fn new() -> Self {
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(FORBIDDEN_PHRASES)
            .expect("static pattern set");
        Self { automaton }
    }

    /// Inspect a message. Deterministic, no side effects.
    ///
    /// Callers guarantee a message string exists; absence is a request
    /// validation error rejected before the pipeline runs, never a silent
    /// "clear" here.
    pub fn inspect(&self, message: &str) -> GuardVerdict {
        match self.automaton.find(message) {
            Some(found) => GuardVerdict::Blocked {
                pattern: FORBIDDEN_PHRASES[found.pattern().as_usize()],
            },
            None => GuardVerdict::Clear,
        }
    }

    pub fn pattern_count(&self) -> usize {
        FORBIDDEN_PHRASES.len()
    }
}

impl Default for PromptGuard {
    fn default() -> Self {
        Self::new()
    }
}
