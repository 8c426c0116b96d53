//! Commands sent to the server that are still waiting for
//! an acknowledgement.
//!
//! The server answers pipelined commands strictly in the order they were sent,
//! so a FIFO queue is enough to match every ParseComplete and CloseComplete
//! with the command that caused it. Commands the pooler issued on its own
//! (preparing a statement before a Bind, closing an evicted statement) are
//! marked as ignored: the client never asked for them and must not see their
//! acknowledgements.

use std::collections::VecDeque;

use super::super::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Forward,
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionItem {
    /// Parse, waiting for ParseComplete.
    Parse { name: String, ignore: bool },
    /// Close, waiting for CloseComplete.
    Close { ignore: bool },
    /// Sync, waiting for ReadyForQuery.
    Sync,
    /// Simple query, waiting for ReadyForQuery.
    Query,
}

impl ExecutionItem {
    fn expected(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "ParseComplete",
            Self::Close { .. } => "CloseComplete",
            Self::Sync | Self::Query => "ReadyForQuery",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProtocolState {
    queue: VecDeque<ExecutionItem>,
}

impl ProtocolState {
    /// A Parse was sent to the server. If `ignore` is set, the
    /// ParseComplete it produces won't be forwarded to the client.
    pub(crate) fn add_parse(&mut self, name: &str, ignore: bool) {
        self.queue.push_back(ExecutionItem::Parse {
            name: name.to_owned(),
            ignore,
        });
    }

    /// A Close was sent to the server.
    pub(crate) fn add_close(&mut self, ignore: bool) {
        self.queue.push_back(ExecutionItem::Close { ignore });
    }

    /// A Sync was sent to the server.
    pub(crate) fn add_sync(&mut self) {
        self.queue.push_back(ExecutionItem::Sync);
    }

    /// A simple query was sent to the server.
    pub(crate) fn add_query(&mut self) {
        self.queue.push_back(ExecutionItem::Query);
    }

    /// The server acknowledged the oldest outstanding Parse.
    /// Returns true if the acknowledgement should be hidden from the client.
    pub fn pop_parse(&mut self) -> Result<bool, Error> {
        match self.queue.front() {
            Some(ExecutionItem::Parse { ignore, .. }) => {
                let ignore = *ignore;
                self.queue.pop_front();
                Ok(ignore)
            }
            front => Err(Error::ProtocolOutOfSync {
                expected: front.map(|item| item.expected()).unwrap_or("nothing"),
                got: '1',
            }),
        }
    }

    /// Decide what to do with a message the server just sent us.
    pub fn action(&mut self, code: char) -> Result<Action, Error> {
        match code {
            '1' => Ok(Self::to_action(self.pop_parse()?)),

            '3' => match self.queue.front() {
                Some(ExecutionItem::Close { ignore }) => {
                    let ignore = *ignore;
                    self.queue.pop_front();
                    Ok(Self::to_action(ignore))
                }
                front => Err(Error::ProtocolOutOfSync {
                    expected: front.map(|item| item.expected()).unwrap_or("nothing"),
                    got: code,
                }),
            },

            'Z' => {
                if matches!(
                    self.queue.front(),
                    Some(ExecutionItem::Sync | ExecutionItem::Query)
                ) {
                    self.queue.pop_front();
                }
                Ok(Action::Forward)
            }

            _ => Ok(Action::Forward),
        }
    }

    /// The server returned an error. It will skip everything until the next Sync,
    /// so commands queued before that Sync will never be acknowledged. An error
    /// caused by a simple query doesn't skip anything after it.
    ///
    /// Returns the names of statements that were never prepared.
    pub fn error(&mut self) -> Vec<String> {
        let mut abandoned = vec![];

        while let Some(item) = self.queue.front() {
            match item {
                ExecutionItem::Sync | ExecutionItem::Query => break,
                ExecutionItem::Parse { name, .. } => abandoned.push(name.clone()),
                ExecutionItem::Close { .. } => (),
            }
            self.queue.pop_front();
        }

        abandoned
    }

    /// Forget everything, e.g. the connection is closed.
    pub fn clear(&mut self) -> usize {
        let len = self.len();
        self.queue.clear();
        len
    }

    fn to_action(ignore: bool) -> Action {
        if ignore {
            Action::Ignore
        } else {
            Action::Forward
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// No acknowledgements outstanding.
    pub fn done(&self) -> bool {
        self.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn queue(&self) -> &VecDeque<ExecutionItem> {
        &self.queue
    }
}
