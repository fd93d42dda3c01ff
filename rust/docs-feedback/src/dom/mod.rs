//! DomSurface: the live page as an `AnnotationSurface`
//!
//! Markers are built node by node (split text, create `<span>`, set
//! attributes) so fragment text never passes through an HTML parser.

pub mod hover;

pub use hover::HoverHandlers;

use feedback_core::{
    excluded_selector, AnnotationSurface, MarkerSpec, Segment, FRAGMENT_ATTR, IDS_ATTR, MARKER_CLASS,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node, Text};

/// `NodeFilter.SHOW_TEXT`
const SHOW_TEXT: u32 = 0x4;

pub struct DomSurface<'a> {
    document: &'a Document,
    root: HtmlElement,
    excluded: String,
    hover: Option<&'a HoverHandlers>,
}

impl<'a> DomSurface<'a> {
    pub fn new(document: &'a Document, hover: Option<&'a HoverHandlers>) -> Result<Self, JsValue> {
        let root = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        Ok(Self {
            document,
            root,
            excluded: excluded_selector(),
            hover,
        })
    }

    fn marker_element(&self, text: &str, spec: &MarkerSpec) -> Result<Element, JsValue> {
        let span = self.document.create_element("span")?;
        span.set_class_name(MARKER_CLASS);
        span.set_attribute(IDS_ATTR, &spec.ids_attr())?;
        span.set_attribute(FRAGMENT_ATTR, &spec.fragment)?;
        span.append_child(&self.document.create_text_node(text))?;
        Ok(span)
    }
}

impl AnnotationSurface for DomSurface<'_> {
    type Node = Text;
    type Marker = Element;
    type Error = JsValue;

    fn markers(&self) -> Result<Vec<(Element, MarkerSpec)>, JsValue> {
        let list = self.root.query_selector_all(&format!(".{}", MARKER_CLASS))?;
        let mut found = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let spec = MarkerSpec::from_attributes(
                &el.get_attribute(IDS_ATTR).unwrap_or_default(),
                &el.get_attribute(FRAGMENT_ATTR).unwrap_or_default(),
            );
            found.push((el, spec));
        }
        Ok(found)
    }

    fn relabel(&mut self, marker: &Element, spec: &MarkerSpec) -> Result<(), JsValue> {
        marker.set_attribute(IDS_ATTR, &spec.ids_attr())
    }

    fn text_nodes(&self) -> Result<Vec<Text>, JsValue> {
        let walker = self
            .document
            .create_tree_walker_with_what_to_show(&self.root, SHOW_TEXT)?;
        let mut nodes = Vec::new();
        while let Some(node) = walker.next_node()? {
            let Some(parent) = node.parent_element() else {
                continue;
            };
            if parent.closest(&self.excluded)?.is_some() {
                continue;
            }
            if let Ok(text) = node.dyn_into::<Text>() {
                nodes.push(text);
            }
        }
        Ok(nodes)
    }

    fn text(&self, node: &Text) -> String {
        node.data()
    }

    fn wrap(&mut self, node: &Text, segments: &[Segment<'_>], marker: &MarkerSpec) -> Result<usize, JsValue> {
        let Some(parent) = node.parent_node() else {
            return Ok(0);
        };
        let fragment = self.document.create_document_fragment();
        let mut created = 0;

        for segment in segments {
            let child: Node = match segment {
                Segment::Plain(s) => self.document.create_text_node(s).into(),
                Segment::Marked(s) => {
                    created += 1;
                    self.marker_element(s, marker)?.into()
                }
            };
            fragment.append_child(&child)?;
        }

        parent.replace_child(&fragment, node)?;
        Ok(created)
    }

    fn finish(&mut self) -> Result<(), JsValue> {
        match self.hover {
            Some(hover) => hover.attach(&self.root).map(|_| ()),
            None => Ok(()),
        }
    }
}
