use crate::component_type_set::ComponentTypeSet;
use crate::utils::typed_index_vec::TiVecKey;
use std::fmt::Display;
use std::fmt::Formatter;
use to_vec::ToVec;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub struct QueryId(pub(crate) usize);

impl QueryId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for QueryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl TiVecKey for QueryId {
    fn from_index(index: usize) -> Self {
        QueryId(index)
    }
    fn as_index(&self) -> usize {
        self.0
    }
}

/// What to do with an entity's membership in a query's collection.
///
/// Collections apply `Add` and `Remove` idempotently, so a transition may be reported for an
/// entity that already is (or never was) a member.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum QueryTransition {
    Add,
    Remove,
    Noop,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Query<S> {
    all: S,
    any: S,
    none: S,
}

impl<S: ComponentTypeSet> Query<S> {
    pub fn new(all: S, any: S, none: S) -> Self {
        Query { all, any, none }
    }

    pub fn from_keys(
        all: impl IntoIterator<Item = S::Key>,
        any: impl IntoIterator<Item = S::Key>,
        none: impl IntoIterator<Item = S::Key>,
    ) -> Self {
        Query {
            all: S::from_keys(all),
            any: S::from_keys(any),
            none: S::from_keys(none),
        }
    }

    pub fn all(&self) -> &S {
        &self.all
    }

    pub fn any(&self) -> &S {
        &self.any
    }

    pub fn none(&self) -> &S {
        &self.none
    }

    pub fn component_types(&self) -> S {
        let mut types = self.all.clone();
        types.add_all(self.any.iter());
        types.add_all(self.none.iter());
        types
    }

    pub fn matches_empty(&self) -> bool {
        self.all.is_empty() && self.any.is_empty()
    }

    pub fn matches(&self, types: &S) -> bool {
        !self.none.overlaps(types) && self.matches_required(types)
    }

    fn matches_required(&self, types: &S) -> bool {
        (self.all.is_empty() || types.contains_all(&self.all))
            && (self.any.is_empty() || self.any.overlaps(types))
    }

    pub fn check(&self, types: &S) -> QueryTransition {
        if !self.none.is_empty() && self.none.overlaps(types) {
            QueryTransition::Remove
        } else if self.matches_required(types) {
            QueryTransition::Add
        } else {
            QueryTransition::Noop
        }
    }

    /// Evaluation after `added` got attached; `types` already contains them.
    pub fn check_on_added(&self, added: &[S::Key], types: &S) -> QueryTransition {
        // an excluded entity stays excluded whatever was added
        if self.none.overlaps_keys(added) || self.none.overlaps(types) {
            QueryTransition::Remove
        } else if self.matches_required(types) {
            QueryTransition::Add
        } else {
            QueryTransition::Noop
        }
    }

    /// Evaluation after `removed` got detached; `types` no longer contains them.
    pub fn check_on_removed(&self, removed: &[S::Key], types: &S) -> QueryTransition {
        if self.all.overlaps_keys(removed) || (!self.any.is_empty() && !self.any.overlaps(types))
        {
            QueryTransition::Remove
        } else if !self.none.overlaps(types) && self.matches_required(types) {
            QueryTransition::Add
        } else {
            QueryTransition::Noop
        }
    }
}

impl<S: ComponentTypeSet> Display for Query<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let render = |set: &S| {
            set.iter()
                .map(|it| format!("{:?}", it))
                .to_vec()
                .join(", ")
        };
        write!(
            f,
            "query!(all: [{}], any: [{}], none: [{}])",
            render(&self.all),
            render(&self.any),
            render(&self.none)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComponentType;
    use crate::ComponentTypeBits;
    use super::QueryTransition::*;

    const POSITION: ComponentType = ComponentType::new(0);
    const VELOCITY: ComponentType = ComponentType::new(1);
    const DEAD: ComponentType = ComponentType::new(2);
    const RED: ComponentType = ComponentType::new(3);
    const BLUE: ComponentType = ComponentType::new(4);

    fn types(keys: &[ComponentType]) -> ComponentTypeBits {
        ComponentTypeBits::from_keys(keys.iter().copied())
    }

    fn moving_alive() -> Query<ComponentTypeBits> {
        Query::from_keys([POSITION, VELOCITY], [], [DEAD])
    }

    #[test]
    fn full_check() {
        let query = moving_alive();
        assert_eq!(query.check(&types(&[POSITION, VELOCITY])), Add);
        assert_eq!(query.check(&types(&[POSITION, VELOCITY, DEAD])), Remove);
        assert_eq!(query.check(&types(&[POSITION])), Noop);
        assert_eq!(query.check(&types(&[])), Noop);
    }

    #[test]
    fn any_requires_at_least_one() {
        let query = Query::<ComponentTypeBits>::from_keys([], [RED, BLUE], []);
        assert_eq!(query.check(&types(&[BLUE])), Add);
        assert_eq!(query.check(&types(&[POSITION])), Noop);
        assert!(!query.matches_empty());
    }

    #[test]
    fn empty_query_matches_everything() {
        let query = Query::<ComponentTypeBits>::from_keys([], [], []);
        assert_eq!(query.check(&types(&[])), Add);
        assert_eq!(query.check(&types(&[DEAD])), Add);
        assert!(query.matches_empty());
    }

    #[test]
    fn added_forbidden_type_removes() {
        let query = moving_alive();
        let after = types(&[POSITION, VELOCITY, DEAD]);
        assert_eq!(query.check_on_added(&[DEAD], &after), Remove);
    }

    #[test]
    fn added_required_type_while_forbidden_present_keeps_excluded() {
        let query = moving_alive();
        let after = types(&[POSITION, VELOCITY, DEAD]);
        assert_eq!(query.check_on_added(&[VELOCITY], &after), Remove);
    }

    #[test]
    fn added_last_required_type_adds() {
        let query = moving_alive();
        assert_eq!(query.check_on_added(&[VELOCITY], &types(&[POSITION, VELOCITY])), Add);
        assert_eq!(query.check_on_added(&[POSITION], &types(&[POSITION])), Noop);
    }

    #[test]
    fn removed_required_type_removes() {
        let query = moving_alive();
        assert_eq!(query.check_on_removed(&[VELOCITY], &types(&[POSITION])), Remove);
    }

    #[test]
    fn removed_last_any_type_removes() {
        let query = Query::<ComponentTypeBits>::from_keys([], [RED, BLUE], []);
        assert_eq!(query.check_on_removed(&[RED], &types(&[POSITION])), Remove);
        assert_eq!(query.check_on_removed(&[RED], &types(&[BLUE])), Add);
    }

    #[test]
    fn removed_forbidden_type_adds_only_if_required_present() {
        let query = moving_alive();
        assert_eq!(query.check_on_removed(&[DEAD], &types(&[POSITION, VELOCITY])), Add);
        assert_eq!(query.check_on_removed(&[DEAD], &types(&[POSITION])), Noop);
    }

    #[test]
    fn display_lists_three_sets() {
        assert_eq!(
            format!("{}", moving_alive()),
            "query!(all: [ComponentType { index: 0 }, ComponentType { index: 1 }], any: [], none: [ComponentType { index: 2 }])"
        );
    }
}
