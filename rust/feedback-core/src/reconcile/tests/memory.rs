//! In-memory document used to exercise the reconciler without a browser

use crate::reconcile::{is_excluded, AnnotationSurface, MarkerSpec, Segment, FRAGMENT_ATTR, IDS_ATTR, MARKER_CLASS};

#[derive(Debug, Clone)]
enum Kind {
    Element {
        tag: String,
        id: Option<String>,
        class: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct MemNode {
    kind: Kind,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Arena-backed element/text tree rooted at `<body>`
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<MemNode>,
    finish_calls: usize,
}

pub const BODY: usize = 0;

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            nodes: vec![MemNode {
                kind: Kind::Element {
                    tag: "body".to_string(),
                    id: None,
                    class: String::new(),
                    attrs: Vec::new(),
                },
                parent: None,
                children: Vec::new(),
            }],
            finish_calls: 0,
        }
    }

    fn push(&mut self, parent: usize, kind: Kind) -> usize {
        let id = self.nodes.len();
        self.nodes.push(MemNode { kind, parent: Some(parent), children: Vec::new() });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn element(&mut self, parent: usize, tag: &str) -> usize {
        self.element_with(parent, tag, None, "")
    }

    pub fn element_with(&mut self, parent: usize, tag: &str, id: Option<&str>, class: &str) -> usize {
        self.push(
            parent,
            Kind::Element {
                tag: tag.to_string(),
                id: id.map(str::to_string),
                class: class.to_string(),
                attrs: Vec::new(),
            },
        )
    }

    pub fn add_text(&mut self, parent: usize, text: &str) -> usize {
        self.push(parent, Kind::Text(text.to_string()))
    }

    pub fn finish_calls(&self) -> usize {
        self.finish_calls
    }

    /// All marker elements as (ids attribute, fragment attribute, inner text)
    pub fn marker_summary(&self) -> Vec<(String, String, String)> {
        let mut found = Vec::new();
        self.collect_marker_nodes(BODY, &mut found);
        found
            .into_iter()
            .map(|idx| (self.attr(idx, IDS_ATTR), self.attr(idx, FRAGMENT_ATTR), self.inner_text(idx)))
            .collect()
    }

    fn collect_marker_nodes(&self, idx: usize, out: &mut Vec<usize>) {
        let node = &self.nodes[idx];
        if let Kind::Element { class, .. } = &node.kind {
            if class == MARKER_CLASS {
                out.push(idx);
            }
        }
        for &child in &node.children {
            self.collect_marker_nodes(child, out);
        }
    }

    fn attr(&self, idx: usize, name: &str) -> String {
        match &self.nodes[idx].kind {
            Kind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
                .unwrap_or_default(),
            Kind::Text(_) => String::new(),
        }
    }

    fn inner_text(&self, idx: usize) -> String {
        match &self.nodes[idx].kind {
            Kind::Text(t) => t.clone(),
            Kind::Element { .. } => self.nodes[idx].children.iter().map(|&c| self.inner_text(c)).collect(),
        }
    }

    /// Concatenated text of the whole body
    pub fn text_content(&self) -> String {
        self.inner_text(BODY)
    }

    /// Serialize to markup for structural comparisons
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(BODY, &mut out);
        out
    }

    fn render_node(&self, idx: usize, out: &mut String) {
        match &self.nodes[idx].kind {
            Kind::Text(t) => out.push_str(t),
            Kind::Element { tag, id, class, attrs } => {
                out.push('<');
                out.push_str(tag);
                if let Some(id) = id {
                    out.push_str(&format!(" id=\"{}\"", id));
                }
                if !class.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", class));
                }
                for (k, v) in attrs {
                    out.push_str(&format!(" {}=\"{}\"", k, v));
                }
                out.push('>');
                for &child in &self.nodes[idx].children {
                    self.render_node(child, out);
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }

    fn excluded(&self, mut idx: usize) -> bool {
        loop {
            if let Kind::Element { tag, id, class, .. } = &self.nodes[idx].kind {
                if is_excluded(tag, id.as_deref(), class) {
                    return true;
                }
            }
            match self.nodes[idx].parent {
                Some(p) => idx = p,
                None => return false,
            }
        }
    }

    fn collect_text(&self, idx: usize, out: &mut Vec<usize>) {
        for &child in &self.nodes[idx].children {
            match &self.nodes[child].kind {
                Kind::Text(_) => out.push(child),
                Kind::Element { .. } => self.collect_text(child, out),
            }
        }
    }

    fn detached_text(&mut self, text: &str) -> usize {
        self.nodes.push(MemNode { kind: Kind::Text(text.to_string()), parent: None, children: Vec::new() });
        self.nodes.len() - 1
    }
}

impl AnnotationSurface for MemoryDocument {
    type Node = usize;
    type Marker = usize;
    type Error = String;

    fn markers(&self) -> Result<Vec<(usize, MarkerSpec)>, String> {
        let mut found = Vec::new();
        self.collect_marker_nodes(BODY, &mut found);
        Ok(found
            .into_iter()
            .map(|idx| (idx, MarkerSpec::from_attributes(&self.attr(idx, IDS_ATTR), &self.attr(idx, FRAGMENT_ATTR))))
            .collect())
    }

    fn relabel(&mut self, marker: &usize, spec: &MarkerSpec) -> Result<(), String> {
        match &mut self.nodes[*marker].kind {
            Kind::Element { attrs, .. } => {
                attrs.retain(|(k, _)| k != IDS_ATTR && k != FRAGMENT_ATTR);
                attrs.push((IDS_ATTR.to_string(), spec.ids_attr()));
                attrs.push((FRAGMENT_ATTR.to_string(), spec.fragment.clone()));
                Ok(())
            }
            Kind::Text(_) => Err("marker handle points at a text node".to_string()),
        }
    }

    fn text_nodes(&self) -> Result<Vec<usize>, String> {
        let mut all = Vec::new();
        self.collect_text(BODY, &mut all);
        Ok(all
            .into_iter()
            .filter(|&idx| self.nodes[idx].parent.map_or(true, |p| !self.excluded(p)))
            .collect())
    }

    fn text(&self, node: &usize) -> String {
        match &self.nodes[*node].kind {
            Kind::Text(t) => t.clone(),
            Kind::Element { .. } => String::new(),
        }
    }

    fn wrap(&mut self, node: &usize, segments: &[Segment<'_>], marker: &MarkerSpec) -> Result<usize, String> {
        let parent = self.nodes[*node].parent.ok_or("text node has no parent")?;
        let mut replacement = Vec::new();
        let mut created = 0;

        for segment in segments {
            match segment {
                Segment::Plain(s) => {
                    let t = self.detached_text(s);
                    self.nodes[t].parent = Some(parent);
                    replacement.push(t);
                }
                Segment::Marked(s) => {
                    self.nodes.push(MemNode {
                        kind: Kind::Element {
                            tag: "span".to_string(),
                            id: None,
                            class: MARKER_CLASS.to_string(),
                            attrs: vec![
                                (IDS_ATTR.to_string(), marker.ids_attr()),
                                (FRAGMENT_ATTR.to_string(), marker.fragment.clone()),
                            ],
                        },
                        parent: Some(parent),
                        children: Vec::new(),
                    });
                    let span = self.nodes.len() - 1;
                    let t = self.detached_text(s);
                    self.nodes[t].parent = Some(span);
                    self.nodes[span].children.push(t);
                    replacement.push(span);
                    created += 1;
                }
            }
        }

        let pos = self.nodes[parent]
            .children
            .iter()
            .position(|&c| c == *node)
            .ok_or("text node not found under parent")?;
        self.nodes[parent].children.splice(pos..=pos, replacement);
        self.nodes[*node].parent = None;
        Ok(created)
    }

    fn finish(&mut self) -> Result<(), String> {
        self.finish_calls += 1;
        Ok(())
    }
}
