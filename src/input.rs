//! src/input.rs
//!
//! Leest één invoercase: `graph.gml` met de vriendschappen en
//! `parameters.txt` met het aantal bussen, de busgrootte en één rowdy groep per
//! regel. Alleen de deelverzameling van GML die graafschrijvers produceren wordt begrepen.

use crate::{error::InputError, graph::Graph, rowdy::RowdyGroup};
use log::warn;
use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;

/// Alles wat de oplosser voor één case nodig heeft.
#[derive(Clone, Debug)]
pub struct Instance {
    pub graph: Graph,
    pub num_buses: usize,
    pub max_size: usize,
    pub groups: Vec<RowdyGroup>,
}

/// Leest `graph.gml` en `parameters.txt` uit de case-map `folder`.
pub fn parse_input(folder: &Path) -> Result<Instance, InputError> {
    let graph_path = folder.join("graph.gml");
    let params_path = folder.join("parameters.txt");
    let gml = read_to_string(&graph_path)
        .map_err(|source| InputError::Io { path: graph_path.clone(), source })?;
    let params = read_to_string(&params_path)
        .map_err(|source| InputError::Io { path: params_path.clone(), source })?;

    let graph = parse_gml(&gml)?;
    let (num_buses, max_size, groups) = parse_parameters(&params, &graph)?;
    Ok(Instance { graph, num_buses, max_size, groups })
}

/*────────── GML ──────────*/

#[derive(Clone, Debug, PartialEq)]
enum Gml {
    Value(String),
    List(Vec<(String, Gml)>),
}

impl Gml {
    fn get(&self, key: &str) -> Option<&Gml> {
        match self {
            Gml::List(items) => items.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Gml::Value(_) => None,
        }
    }

    fn text(&self) -> Option<&str> {
        match self {
            Gml::Value(s) => Some(s),
            Gml::List(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Open,
    Close,
    Word(String),
    Quoted(String),
}

fn tokenize(text: &str) -> Result<Vec<Token>, InputError> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            '[' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ']' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '"' => {
                chars.next();
                let mut s = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(ch) => s.push(ch),
                        None => return Err(InputError::Gml("unterminated string".into())),
                    }
                }
                tokens.push(Token::Quoted(s));
            }
            '#' => {
                // Commentaar tot het einde van de regel.
                while chars.next().is_some_and(|ch| ch != '\n') {}
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            _ => {
                let mut s = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_whitespace() || ch == '[' || ch == ']' || ch == '"' {
                        break;
                    }
                    s.push(ch);
                    chars.next();
                }
                tokens.push(Token::Word(s));
            }
        }
    }
    Ok(tokens)
}

/// Parset `key value`-paren tot de sluitende haak (of tot het einde als
/// `nested` false is).
fn parse_list<I: Iterator<Item = Token>>(tokens: &mut I, nested: bool) -> Result<Gml, InputError> {
    let mut items = Vec::new();
    loop {
        let key = match tokens.next() {
            Some(Token::Word(k)) => k,
            Some(Token::Close) if nested => return Ok(Gml::List(items)),
            None if !nested => return Ok(Gml::List(items)),
            None => return Err(InputError::Gml("missing ']'".into())),
            Some(t) => return Err(InputError::Gml(format!("expected a key, found {:?}", t))),
        };
        let value = match tokens.next() {
            Some(Token::Open) => parse_list(tokens, true)?,
            Some(Token::Word(v)) | Some(Token::Quoted(v)) => Gml::Value(v),
            other => {
                return Err(InputError::Gml(format!("expected a value for '{}', found {:?}", key, other)))
            }
        };
        items.push((key, value));
    }
}

/// Parset een GML-document naar een [`Graph`]. Knopen heten naar hun `label`
/// (of hun `id` zonder label); kanten verwijzen naar knoop-ids. Self-loops en
/// dubbele kanten vervallen, dubbele labels zijn een fout.
pub fn parse_gml(text: &str) -> Result<Graph, InputError> {
    let mut tokens = tokenize(text)?.into_iter();
    let root = parse_list(&mut tokens, false)?;
    let Some(Gml::List(items)) = root.get("graph") else {
        return Err(InputError::Gml("no graph block".into()));
    };

    let mut graph = Graph::new();
    let mut ids: HashMap<&str, usize> = HashMap::new();
    for (key, node) in items.iter().filter(|(k, _)| k == "node") {
        let id = node
            .get("id")
            .and_then(Gml::text)
            .ok_or_else(|| InputError::Gml(format!("{} without id", key)))?;
        let label = node.get("label").and_then(Gml::text).unwrap_or(id);
        if graph.index_of(label).is_some() {
            return Err(InputError::Gml(format!("duplicate label '{}'", label)));
        }
        let v = graph.add_node(label);
        ids.insert(id, v);
    }

    for (_, edge) in items.iter().filter(|(k, _)| k == "edge") {
        let endpoint = |name: &str| -> Result<usize, InputError> {
            let id = edge
                .get(name)
                .and_then(Gml::text)
                .ok_or_else(|| InputError::Gml(format!("edge without {}", name)))?;
            ids.get(id)
                .copied()
                .ok_or_else(|| InputError::Gml(format!("edge refers to unknown node {}", id)))
        };
        let (u, v) = (endpoint("source")?, endpoint("target")?);
        if u != v && !graph.has_edge(u, v) {
            graph.add_edge(u, v);
        }
    }
    Ok(graph)
}

/*────────── parameters.txt ──────────*/

fn parse_count(line: Option<(usize, &str)>, what: &str) -> Result<usize, InputError> {
    let (index, text) = line.ok_or_else(|| InputError::Parameters {
        line: 0,
        reason: format!("missing {}", what),
    })?;
    text.trim().parse().map_err(|_| InputError::Parameters {
        line: index + 1,
        reason: format!("invalid {} '{}'", what, text.trim()),
    })
}

/// Splitst een groepsregel zoals `['1', '7', '12']` in identifiers.
fn group_labels(line: &str) -> Vec<&str> {
    let inner = line.trim().trim_start_matches('[').trim_end_matches(']');
    inner
        .split(',')
        .map(|s| s.trim().trim_matches(|c| c == '\'' || c == '"'))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parset het aantal bussen, de busgrootte en de rowdy groepen. Een groep met
/// een leerling die niet in `graph` zit, kan nooit compleet in één bus zitten en
/// wordt met een waarschuwing overgeslagen.
pub fn parse_parameters(
    text: &str,
    graph: &Graph,
) -> Result<(usize, usize, Vec<RowdyGroup>), InputError> {
    let mut lines = text.lines().enumerate();
    let num_buses = parse_count(lines.next(), "bus count")?;
    let max_size = parse_count(lines.next(), "bus size")?;

    let mut groups = Vec::new();
    for (index, line) in lines.filter(|(_, l)| !l.trim().is_empty()) {
        let (group, unknown) = RowdyGroup::from_labels(graph, group_labels(line));
        if !unknown.is_empty() {
            warn!("skipping rowdy group on line {}: unknown students {:?}", index + 1, unknown);
            continue;
        }
        groups.push(group);
    }
    Ok((num_buses, max_size, groups))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_keeps_quoted_spaces() {
        let tokens = tokenize("label \"a b\" [ ]").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Word("label".into()),
                Token::Quoted("a b".into()),
                Token::Open,
                Token::Close
            ]
        );
    }

    #[test]
    fn group_line_is_split_into_labels() {
        assert_eq!(group_labels("['1', '7', '12']"), vec!["1", "7", "12"]);
        assert_eq!(group_labels("[]"), Vec::<&str>::new());
    }
}
