use crate::road_network::RoadNode;

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

const TSV_SEPARATOR: char = '\t';

/// Formats the position of a road node as `<lat>\t<lon>`.
pub fn position_tsv(node: &RoadNode) -> String {
    format!(
        "{}{}{}",
        node.latitude(),
        TSV_SEPARATOR,
        node.longitude()
    )
}

/// Formats the positions of the given road nodes as TSV, one line per
/// node in input order, separated by the platform's line separator.
pub fn positions_tsv<I>(nodes: I) -> String
where
    I: IntoIterator<Item = RoadNode>,
{
    let lines: Vec<String> = nodes
        .into_iter()
        .map(|node| position_tsv(&node))
        .collect();
    lines.join(LINE_SEPARATOR)
}
