use crate::errors::{CoverageError, Result};
use crate::path::{self, FieldSet};
use graphql_parser::query::{
    Definition, Document, FragmentDefinition, OperationDefinition, Selection, SelectionSet,
};
use std::collections::{BTreeSet, HashMap};

/// Fragment definitions of one document, by name. Later definitions shadow
/// earlier ones with the same name.
pub type Fragments<'d, 'a> = HashMap<&'d str, &'d FragmentDefinition<'a, String>>;

pub fn collect_fragments<'d, 'a>(doc: &'d Document<'a, String>) -> Fragments<'d, 'a> {
    doc.definitions
        .iter()
        .filter_map(|def| match def {
            Definition::Fragment(fragment) => Some((fragment.name.as_str(), fragment)),
            Definition::Operation(_) => None,
        })
        .collect()
}

/// Upper bound on selections visited while expanding one operation. Fragments
/// that spread each other repeatedly grow exponentially without it.
pub const MAX_EXPANDED_SELECTIONS: usize = 100_000;

/// Fields one operation selects, plus the fragment spreads it could not
/// resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationFields {
    pub fields: FieldSet,
    pub missing_fragments: BTreeSet<String>,
}

/// Expand an operation's selection set into hierarchical field paths.
///
/// Fragment spreads and inline fragments are flattened onto the location they
/// appear at. Type conditions are ignored. A field is a leaf when it has no
/// sub-selection.
pub fn extract_operation_fields<'d, 'a>(
    operation: &'d OperationDefinition<'a, String>,
    fragments: &Fragments<'d, 'a>,
    only_leafs: bool,
) -> Result<OperationFields> {
    let mut walker = SelectionWalker {
        fragments,
        only_leafs,
        active: Vec::new(),
        visited: 0,
        out: OperationFields::default(),
    };
    walker.walk(selection_set(operation), "")?;
    Ok(walker.out)
}

/// Display name for an operation, for diagnostics.
pub fn operation_name<'d>(operation: &'d OperationDefinition<'_, String>) -> &'d str {
    let name = match operation {
        OperationDefinition::SelectionSet(_) => None,
        OperationDefinition::Query(q) => q.name.as_deref(),
        OperationDefinition::Mutation(m) => m.name.as_deref(),
        OperationDefinition::Subscription(s) => s.name.as_deref(),
    };
    name.unwrap_or("<anonymous>")
}

fn selection_set<'d, 'a>(operation: &'d OperationDefinition<'a, String>) -> &'d SelectionSet<'a, String> {
    match operation {
        OperationDefinition::SelectionSet(set) => set,
        OperationDefinition::Query(q) => &q.selection_set,
        OperationDefinition::Mutation(m) => &m.selection_set,
        OperationDefinition::Subscription(s) => &s.selection_set,
    }
}

struct SelectionWalker<'f, 'd, 'a> {
    fragments: &'f Fragments<'d, 'a>,
    only_leafs: bool,
    /// Fragments currently being expanded, outermost first.
    active: Vec<&'d str>,
    /// Selections visited so far, bounded by `MAX_EXPANDED_SELECTIONS`.
    visited: usize,
    out: OperationFields,
}

impl<'f, 'd, 'a> SelectionWalker<'f, 'd, 'a> {
    fn walk(&mut self, set: &'d SelectionSet<'a, String>, parent_path: &str) -> Result<()> {
        for selection in &set.items {
            self.visited += 1;
            if self.visited > MAX_EXPANDED_SELECTIONS {
                return Err(CoverageError::ExpansionLimit {
                    limit: MAX_EXPANDED_SELECTIONS,
                });
            }

            match selection {
                Selection::Field(field) => {
                    let path = path::join(parent_path, &field.name);
                    let is_leaf = field.selection_set.items.is_empty();

                    if !self.only_leafs || is_leaf {
                        self.out.fields.insert(path.clone());
                    }
                    if !is_leaf {
                        self.walk(&field.selection_set, &path)?;
                    }
                }
                Selection::FragmentSpread(spread) => {
                    let name = spread.fragment_name.as_str();
                    let fragments = self.fragments;
                    let Some(fragment) = fragments.get(name).copied() else {
                        tracing::debug!("Fragment '{name}' not found (spread at '{parent_path}')");
                        self.out.missing_fragments.insert(name.to_string());
                        continue;
                    };

                    if self.active.contains(&name) {
                        let mut chain: Vec<&str> = self.active.clone();
                        chain.push(name);
                        return Err(CoverageError::FragmentCycle {
                            fragment: name.to_string(),
                            chain: chain.join(" -> "),
                        });
                    }

                    self.active.push(name);
                    self.walk(&fragment.selection_set, parent_path)?;
                    self.active.pop();
                }
                Selection::InlineFragment(inline) => {
                    self.walk(&inline.selection_set, parent_path)?;
                }
            }
        }
        Ok(())
    }
}
