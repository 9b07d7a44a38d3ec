use super::grid::Coordinate;
use std::collections::VecDeque;

/// The cells occupied by the snake.
///
/// The head is stored apart from the rest of the body so that a snake always
/// has at least one segment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    head: Coordinate,

    /// The remaining segments, starting with the one right behind the head
    /// and ending with the tip of the tail
    tail: VecDeque<Coordinate>,
}

impl Snake {
    /// Create a one-segment snake at `head`
    pub(crate) fn new(head: Coordinate) -> Snake {
        Snake {
            head,
            tail: VecDeque::new(),
        }
    }

    /// Build a snake from its segments, head first.  Returns `None` if
    /// `segments` is empty.
    #[cfg(test)]
    pub(crate) fn from_segments<I: IntoIterator<Item = Coordinate>>(segments: I) -> Option<Snake> {
        let mut iter = segments.into_iter();
        let head = iter.next()?;
        Some(Snake {
            head,
            tail: iter.collect(),
        })
    }

    pub(crate) fn head(&self) -> Coordinate {
        self.head
    }

    /// The number of segments, counting the head
    pub(crate) fn len(&self) -> usize {
        self.tail.len() + 1
    }

    pub(crate) fn contains(&self, pos: Coordinate) -> bool {
        self.head == pos || self.tail.contains(&pos)
    }

    /// Iterate over the snake's segments, head first
    pub(crate) fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        std::iter::once(self.head).chain(self.tail.iter().copied())
    }

    /// Return a copy of the snake with a new head at `head`.  Unless `grow`
    /// is true, the last segment is dropped so the length stays the same.
    pub(crate) fn moved_to(&self, head: Coordinate, grow: bool) -> Snake {
        let mut tail = self.tail.clone();
        tail.push_front(self.head);
        if !grow {
            let _ = tail.pop_back();
        }
        Snake { head, tail }
    }
}
