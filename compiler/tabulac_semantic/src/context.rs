//! Contains the definition of [`ContextStack`].

use tabulac_syntax::ElementKind;

/// Tracks the chain of element kinds enclosing the declaration currently
/// being validated.
///
/// The validator pushes an element's kind on entry and pops it on exit, so
/// at any point the stack top is the element under validation and the
/// entry below it is its enclosing context. A validation pass leaves the
/// stack exactly as it found it, whatever the checks decided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextStack {
    kinds: Vec<ElementKind>,
}

impl ContextStack {
    /// Creates a new empty [`ContextStack`].
    #[must_use]
    pub const fn new() -> Self { Self { kinds: Vec::new() } }

    /// Pushes the kind of the element being entered.
    pub fn push(&mut self, kind: ElementKind) { self.kinds.push(kind); }

    /// Pops the kind of the element being exited and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty: an unbalanced enter/exit pairing is a
    /// bug in the validation pass, never a property of the input.
    pub fn pop(&mut self) -> ElementKind {
        self.kinds.pop().expect("popped an empty context stack")
    }

    /// Gets the kind of the element currently under validation.
    #[must_use]
    pub fn top(&self) -> Option<ElementKind> { self.kinds.last().copied() }

    /// Gets the kind of the element enclosing the one currently under
    /// validation, or [`None`] when it sits at the top level.
    #[must_use]
    pub fn parent(&self) -> Option<ElementKind> {
        self.kinds
            .len()
            .checked_sub(2)
            .and_then(|index| self.kinds.get(index))
            .copied()
    }

    /// Gets the number of kinds currently on the stack.
    #[must_use]
    pub fn depth(&self) -> usize { self.kinds.len() }

    /// Returns `true` if nothing is on the stack.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.kinds.is_empty() }
}

#[cfg(test)]
mod tests {
    use tabulac_syntax::ElementKind;

    use crate::context::ContextStack;

    #[test]
    fn parent_is_the_entry_below_the_top() {
        let mut stack = ContextStack::new();
        assert_eq!(stack.top(), None);
        assert_eq!(stack.parent(), None);

        stack.push(ElementKind::Table);
        assert_eq!(stack.top(), Some(ElementKind::Table));
        assert_eq!(stack.parent(), None);

        stack.push(ElementKind::Indexes);
        assert_eq!(stack.top(), Some(ElementKind::Indexes));
        assert_eq!(stack.parent(), Some(ElementKind::Table));

        assert_eq!(stack.pop(), ElementKind::Indexes);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    #[should_panic(expected = "popped an empty context stack")]
    fn popping_an_empty_stack_panics() {
        let mut stack = ContextStack::new();
        let _ = stack.pop();
    }
}
