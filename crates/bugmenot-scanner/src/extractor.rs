//! Positional record extraction over an account block's tokens.
//!
//! Account blocks read like `Username: bob Password: swordfish Other: - Stats:
//! 87% success rate 12 votes 3 months old`. The extractor walks the tokens
//! once, front to back, as a small state machine keyed on the label tokens.
//! It never fails: anything it cannot place is left as `None`.

use crate::record::CredentialRecord;
use crate::tokenizer::tokenize;

pub const USERNAME_LABEL: &str = "Username:";
pub const PASSWORD_LABEL: &str = "Password:";
pub const OTHER_LABEL: &str = "Other:";
pub const STATS_LABEL: &str = "Stats:";

/// Tokens in `87% success rate`.
const SUCCESS_RATE_WIDTH: usize = 3;
/// Tokens in `12 votes`.
const VOTES_WIDTH: usize = 2;
/// Tokens in `3 months old`.
const AGE_WIDTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    SawUsername,
    SawPassword,
    SawOther,
    SawStats,
    Done,
}

struct RecordExtractor<'a> {
    tokens: &'a [&'a str],
    cursor: usize,
    record: CredentialRecord,
}

impl<'a> RecordExtractor<'a> {
    fn new(tokens: &'a [&'a str], original_sequence: usize) -> Self {
        Self {
            tokens,
            cursor: 0,
            record: CredentialRecord::empty(original_sequence),
        }
    }

    fn run(mut self) -> CredentialRecord {
        let mut state = State::Start;
        while state != State::Done {
            state = self.step(state);
        }
        self.record
    }

    fn step(&mut self, state: State) -> State {
        match state {
            State::Start => {
                self.username_slot();
                State::SawUsername
            }
            State::SawUsername => {
                self.password_slot();
                State::SawPassword
            }
            State::SawPassword => {
                self.other_slot();
                State::SawOther
            }
            State::SawOther => {
                if self.current() == Some(STATS_LABEL) {
                    self.cursor += 1;
                    State::SawStats
                } else {
                    State::Done
                }
            }
            State::SawStats => {
                self.stats_phrases();
                State::Done
            }
            State::Done => State::Done,
        }
    }

    fn current(&self) -> Option<&'a str> {
        self.peek(0)
    }

    fn peek(&self, offset: usize) -> Option<&'a str> {
        self.tokens.get(self.cursor + offset).copied()
    }

    /// The username label only counts at the very first token. The slot is
    /// two tokens wide whether or not it held anything.
    fn username_slot(&mut self) {
        if self.tokens.first() == Some(&USERNAME_LABEL) {
            if let Some(value) = self.tokens.get(1) {
                self.record.set_username(value);
            }
        }
        self.cursor += 2;
    }

    /// An empty password is rendered as the bare label, so the next section's
    /// label can sit where the value would be. Only a real value consumes a
    /// second token.
    fn password_slot(&mut self) {
        if self.current() != Some(PASSWORD_LABEL) {
            return;
        }
        match self.peek(1) {
            Some(value) if value != OTHER_LABEL && value != STATS_LABEL => {
                self.record.set_password(value);
                self.cursor += 2;
            }
            _ => self.cursor += 1,
        }
    }

    fn other_slot(&mut self) {
        if self.current() == Some(OTHER_LABEL) {
            self.cursor += 2;
        }
    }

    fn stats_phrases(&mut self) {
        if let Some(phrase) = self.take(SUCCESS_RATE_WIDTH) {
            self.record.set_success_rate(phrase);
        }
        if let Some(phrase) = self.take(VOTES_WIDTH) {
            self.record.set_votes(phrase);
        }
        if let Some(phrase) = self.take(AGE_WIDTH) {
            self.record.set_age(phrase);
        }
    }

    /// Fixed-width phrase at the cursor. The cursor moves past the phrase
    /// even when too few tokens remain to fill it.
    fn take(&mut self, width: usize) -> Option<&'a [&'a str]> {
        let phrase = self.tokens.get(self.cursor..self.cursor + width);
        self.cursor += width;
        phrase
    }
}

/// Build a record from an already tokenized account block.
#[must_use]
pub fn extract_record(tokens: &[&str], original_sequence: usize) -> CredentialRecord {
    RecordExtractor::new(tokens, original_sequence).run()
}

/// Tokenize an account block's text and extract its record.
#[must_use]
pub fn extract_block(text: &str, original_sequence: usize) -> CredentialRecord {
    let tokens = tokenize(text);
    extract_record(&tokens, original_sequence)
}
