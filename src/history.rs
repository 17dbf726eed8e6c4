use crate::DrawRequest;
use std::slice;

/// Append-only log of issued drawing requests
///
/// Requests are kept in the order they were issued, later requests are
/// drawn over earlier ones when the log is replayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CommandHistory {
    requests: Vec<DrawRequest>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, request: DrawRequest) {
        self.requests.push(request)
    }

    pub fn clear(&mut self) {
        self.requests.clear()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn as_slice(&self) -> &[DrawRequest] {
        &self.requests
    }

    pub fn iter(&self) -> slice::Iter<'_, DrawRequest> {
        self.requests.iter()
    }
}

impl<'a> IntoIterator for &'a CommandHistory {
    type Item = &'a DrawRequest;
    type IntoIter = slice::Iter<'a, DrawRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<DrawRequest> for CommandHistory {
    fn from_iter<T: IntoIterator<Item = DrawRequest>>(iter: T) -> Self {
        Self {
            requests: iter.into_iter().collect(),
        }
    }
}

impl Extend<DrawRequest> for CommandHistory {
    fn extend<T: IntoIterator<Item = DrawRequest>>(&mut self, iter: T) {
        self.requests.extend(iter)
    }
}
