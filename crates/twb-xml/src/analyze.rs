//! Structural analysis: fields, formulas, worksheets and naming clusters.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};
use twb_model::{AnalysisReport, PrefixCluster, UNKNOWN_VERSION};

use crate::labels::{CALCULATION, COLUMN, WORKSHEET};
use crate::tree::{DocumentTree, Node};

/// Collect structural metadata from a workbook tree.
///
/// Every node is visited in document order. Column and worksheet names are
/// de-duplicated keeping first-seen order; formulas are kept as found.
/// Empty attribute values are ignored.
pub fn analyze(tree: &DocumentTree) -> AnalysisReport {
    let mut fields = FirstSeen::default();
    let mut worksheets = FirstSeen::default();
    let mut calculated_fields = Vec::new();

    for (id, node) in tree.descendants() {
        match node.label() {
            COLUMN => {
                if let Some(name) = non_empty(node, "name") {
                    fields.insert(name);
                }
            }
            CALCULATION => {
                if let Some(formula) = non_empty(node, "formula") {
                    debug!(path = %tree.path(id), formula, "calculated field");
                    calculated_fields.push(formula.to_string());
                }
            }
            WORKSHEET => {
                if let Some(name) = non_empty(node, "name") {
                    worksheets.insert(name);
                }
            }
            _ => {}
        }
    }

    let fields = fields.into_vec();
    let clusters = prefix_clusters(&fields);
    let workbook_version = tree
        .root()
        .and_then(|root| root.attribute("version"))
        .unwrap_or(UNKNOWN_VERSION)
        .to_string();

    info!(
        version = %workbook_version,
        fields = fields.len(),
        calculated_fields = calculated_fields.len(),
        worksheets = worksheets.order.len(),
        clusters = clusters.len(),
        "workbook analyzed"
    );
    AnalysisReport {
        workbook_version,
        fields,
        calculated_fields,
        worksheets: worksheets.into_vec(),
        clusters,
    }
}

/// Group multi-word field names by their first word.
///
/// Single-word names never cluster, and only prefixes shared by at least two
/// names are kept. Clusters follow the first appearance of their prefix.
pub fn prefix_clusters<S: AsRef<str>>(fields: &[S]) -> Vec<PrefixCluster> {
    let mut clusters: Vec<PrefixCluster> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for field in fields {
        let field = field.as_ref();
        let mut words = field.split_whitespace();
        let (Some(prefix), Some(_)) = (words.next(), words.next()) else {
            continue;
        };
        match slots.get(prefix) {
            Some(&slot) => clusters[slot].fields.push(field.to_string()),
            None => {
                slots.insert(prefix, clusters.len());
                clusters.push(PrefixCluster {
                    prefix: prefix.to_string(),
                    fields: vec![field.to_string()],
                });
            }
        }
    }

    clusters.retain(|cluster| cluster.fields.len() >= 2);
    clusters
}

fn non_empty<'a>(node: &'a Node, attribute: &str) -> Option<&'a str> {
    node.attribute(attribute).filter(|value| !value.is_empty())
}

/// Insertion-ordered set of strings.
#[derive(Default)]
struct FirstSeen {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl FirstSeen {
    fn insert(&mut self, value: &str) {
        if self.seen.insert(value.to_string()) {
            self.order.push(value.to_string());
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.order
    }
}
