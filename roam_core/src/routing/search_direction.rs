/// Direction a best-first exploration walks edges in: `Forward` follows
/// outgoing edges, `Backward` incoming ones.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum SearchDirection {
    Forward,
    Backward,
}
