//! Next-question selection

use super::catalog::QuestionCatalog;
use super::question::Question;

/// Pick the next question to ask.
///
/// Returns the first unasked question in catalog order. While any custom
/// question is still unasked the pick is always a custom question, even if
/// the catalog order was somehow inconsistent.
pub fn select_next(catalog: &QuestionCatalog) -> Option<&Question> {
    let first_unasked = catalog.questions().iter().find(|q| !q.asked)?;
    if first_unasked.is_custom() {
        return Some(first_unasked);
    }

    catalog
        .questions()
        .iter()
        .find(|q| !q.asked && q.is_custom())
        .or(Some(first_unasked))
}
