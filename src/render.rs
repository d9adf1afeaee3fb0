use crate::catalog::LoadState;

/// What a list container shows after a render pass.
#[derive(Clone, Debug, PartialEq)]
pub enum Rendered<V> {
    /// The catalog is still being fetched.
    Loading,
    Cards(Vec<V>),
    /// Nothing matched; holds the view's placeholder text.
    Empty(&'static str),
    /// The catalog never loaded; holds the fixed error text.
    Error(&'static str),
}

impl<V> Rendered<V> {
    pub fn cards(&self) -> &[V] {
        match self {
            Rendered::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Rendered::Loading | Rendered::Cards(_) => None,
            Rendered::Empty(text) | Rendered::Error(text) => Some(*text),
        }
    }
}

/// Builds one card per record in order. A pending or failed load wins
/// over an empty result.
pub fn render<'a, T, V>(
    state: &LoadState<T>,
    records: &[&'a T],
    placeholder: &'static str,
    card: impl FnMut(&'a T) -> V,
) -> Rendered<V> {
    if state.is_loading() {
        return Rendered::Loading;
    }
    if let Some(error) = state.error() {
        return Rendered::Error(error);
    }
    render_list(records, placeholder, card)
}

pub fn render_list<'a, T, V>(
    records: &[&'a T],
    placeholder: &'static str,
    mut card: impl FnMut(&'a T) -> V,
) -> Rendered<V> {
    if records.is_empty() {
        return Rendered::Empty(placeholder);
    }
    Rendered::Cards(records.iter().map(|&r| card(r)).collect())
}

pub fn plural(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

/// Picks `count` items starting at an offset derived from `seed`, wrapping
/// around. The same seed always yields the same picks.
pub fn rotate_pick<T>(items: &[T], count: usize, seed: u64) -> Vec<&T> {
    if items.is_empty() {
        return Vec::new();
    }
    let start = (seed as usize).wrapping_mul(count) % items.len();
    items
        .iter()
        .cycle()
        .skip(start)
        .take(count.min(items.len()))
        .collect()
}
