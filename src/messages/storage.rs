use super::types::ChatMessage;
use parking_lot::RwLock;
use std::sync::Arc;

/// Append-only chat log shared between the assistant and its reply tasks.
///
/// Insertion order is display order. Entries are never removed or edited.
#[derive(Debug, Clone)]
pub struct MessageLog {
    messages: Arc<RwLock<Vec<ChatMessage>>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Append `message` and return its position in the log
    pub fn append(&self, message: ChatMessage) -> usize {
        self.append_then(message, |_, _| {})
    }

    /// Append `message`, then run `observe` before the write lock is
    /// released. Anything `observe` publishes is therefore seen in the same
    /// order as the log. `observe` must not touch the log itself.
    pub fn append_then<F>(&self, message: ChatMessage, observe: F) -> usize
    where
        F: FnOnce(usize, &ChatMessage),
    {
        let mut messages = self.messages.write();
        let index = messages.len();
        messages.push(message);
        observe(index, &messages[index]);
        index
    }

    pub fn get(&self, index: usize) -> Option<ChatMessage> {
        self.messages.read().get(index).cloned()
    }

    pub fn get_all(&self) -> Vec<ChatMessage> {
        self.messages.read().clone()
    }

    pub fn last(&self) -> Option<ChatMessage> {
        self.messages.read().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Role;

    #[test]
    fn test_append_preserves_insertion_order() {
        let log = MessageLog::new();
        assert!(log.is_empty());

        for i in 0..5 {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            log.append(ChatMessage::new(role, format!("turn {}", i)));
        }

        let all = log.get_all();
        assert_eq!(all.len(), 5);
        for (i, msg) in all.iter().enumerate() {
            assert_eq!(msg.text, format!("turn {}", i));
        }
        assert_eq!(log.last().unwrap().text, "turn 4");
    }

    #[test]
    fn test_append_leaves_earlier_entries_untouched() {
        let log = MessageLog::new();
        log.append(ChatMessage::user("first"));
        let before = log.get_all();

        log.append(ChatMessage::assistant("second"));
        log.append(ChatMessage::user("third"));

        let after = log.get_all();
        assert_eq!(after[0], before[0]);
        assert_eq!(after.len(), 3);
    }

    #[test]
    fn test_clones_share_the_same_log() {
        let log = MessageLog::new();
        let handle = log.clone();
        handle.append(ChatMessage::user("from clone"));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_append_returns_position() {
        let log = MessageLog::new();
        assert_eq!(log.append(ChatMessage::user("a")), 0);
        assert_eq!(log.append(ChatMessage::assistant("b")), 1);
        assert_eq!(log.get(1).map(|m| m.text), Some("b".to_string()));
        assert!(log.get(2).is_none());
    }

    #[test]
    fn test_observer_sees_appended_entry() {
        let log = MessageLog::new();
        log.append(ChatMessage::user("first"));

        let mut seen = None;
        let index = log.append_then(ChatMessage::assistant("second"), |i, msg| {
            seen = Some((i, msg.text.clone()));
        });

        assert_eq!(index, 1);
        assert_eq!(seen, Some((1, "second".to_string())));
    }

    #[test]
    fn test_concurrent_observers_follow_log_order() {
        let log = MessageLog::new();
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let log = log.clone();
                let order = order.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        log.append_then(ChatMessage::user(format!("{}-{}", t, i)), |_, msg| {
                            order.lock().push(msg.id);
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let logged: Vec<_> = log.get_all().into_iter().map(|m| m.id).collect();
        assert_eq!(logged.len(), 200);
        assert_eq!(*order.lock(), logged);
    }
}
