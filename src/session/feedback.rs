//! Bounded feedback queue
//!
//! Keeps only the most recent messages; pushing past capacity evicts the
//! oldest first.

use std::collections::VecDeque;

use serde::{Serialize, Serializer};

use super::models::FeedbackMessage;

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackQueue {
    capacity: usize,
    messages: VecDeque<FeedbackMessage>,
}

impl FeedbackQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            messages: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, message: FeedbackMessage) {
        while self.messages.len() >= self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Messages, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &FeedbackMessage> {
        self.messages.iter()
    }

    pub fn latest(&self) -> Option<&FeedbackMessage> {
        self.messages.back()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Serialize for FeedbackQueue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.messages.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::models::FeedbackKind;

    fn message(text: &str) -> FeedbackMessage {
        FeedbackMessage::new(text.to_string(), FeedbackKind::Tip, 0)
    }

    #[test]
    fn test_keeps_three_most_recent() {
        let mut queue = FeedbackQueue::new(3);
        for text in ["one", "two", "three", "four"] {
            queue.push(message(text));
        }

        let texts: Vec<_> = queue.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["two", "three", "four"]);
        assert_eq!(queue.latest().unwrap().text, "four");
    }

    #[test]
    fn test_serializes_as_list() {
        let mut queue = FeedbackQueue::new(2);
        queue.push(message("hello"));

        let json = serde_json::to_value(&queue).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["text"], "hello");
        assert_eq!(json[0]["kind"], "tip");
    }
}
