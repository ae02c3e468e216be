use serde::{Deserialize, Serialize};

use crate::floorplan::{
    element::{CanonicalElement, ElementKind, Shape},
    normalizer::CanonicalLayout,
};

pub const NO_LAYOUT_MESSAGE: &str = "No floor plan available.";
pub const NO_ELEMENTS_MESSAGE: &str = "No floor plan elements to display.";
pub const CONTAINER_BACKGROUND: &str = "#f9f9f9";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NodeClass {
    #[serde(rename = "table-item")]
    TableItem,
    #[serde(rename = "layout-element")]
    LayoutElement,
}

impl NodeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TableItem => "table-item",
            Self::LayoutElement => "layout-element",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeStyle {
    pub left: String,
    pub top: String,
    pub width: String,
    pub height: String,
}

/// One positioned floor-plan item, ready to be projected onto an element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisualNode {
    /// Index of the source element in the canonical layout.
    pub position: usize,
    pub class: NodeClass,
    pub style: NodeStyle,
    pub shape: Shape,
    pub text: String,
    pub kind: ElementKind,
    pub data_table_id: String,
    pub data_table_number: String,
    pub selected: bool,
}

impl VisualNode {
    fn from_element(position: usize, element: &CanonicalElement) -> Self {
        let class = if element.is_table() {
            NodeClass::TableItem
        } else {
            NodeClass::LayoutElement
        };
        Self {
            position,
            class,
            style: NodeStyle {
                left: element.left.to_css(),
                top: element.top.to_css(),
                width: element.width.to_css(),
                height: element.height.to_css(),
            },
            shape: element.shape,
            text: element.label.clone(),
            kind: element.kind.clone(),
            data_table_id: element.table_id().unwrap_or_default().to_string(),
            data_table_number: element.table_number().unwrap_or_default().to_string(),
            selected: false,
        }
    }

    pub fn is_table(&self) -> bool {
        self.class == NodeClass::TableItem
    }

    pub fn is_circle(&self) -> bool {
        self.shape == Shape::Circle
    }

    pub fn class_list(&self) -> String {
        if self.selected {
            format!("{} selected", self.class.as_str())
        } else {
            self.class.as_str().to_string()
        }
    }

    pub fn inline_style(&self) -> String {
        format!(
            "left: {}; top: {}; width: {}; height: {}; display: flex; align-items: center; \
             justify-content: center; border-radius: {}; box-sizing: border-box; overflow: hidden;",
            self.style.left,
            self.style.top,
            self.style.width,
            self.style.height,
            self.shape.border_radius()
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ContainerContent {
    #[default]
    Empty,
    Placeholder(String),
    Nodes(Vec<VisualNode>),
}

/// The floor-plan canvas inside the overlay.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LayoutContainer {
    pub width: Option<String>,
    pub height: Option<String>,
    pub background: Option<String>,
    pub content: ContainerContent,
}

impl LayoutContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[VisualNode] {
        match &self.content {
            ContainerContent::Nodes(nodes) => nodes,
            ContainerContent::Empty | ContainerContent::Placeholder(_) => &[],
        }
    }

    pub fn nodes_mut(&mut self) -> &mut [VisualNode] {
        match &mut self.content {
            ContainerContent::Nodes(nodes) => nodes,
            ContainerContent::Empty | ContainerContent::Placeholder(_) => &mut [],
        }
    }

    pub fn node(&self, position: usize) -> Option<&VisualNode> {
        self.nodes().iter().find(|node| node.position == position)
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.content {
            ContainerContent::Placeholder(message) => Some(message),
            ContainerContent::Empty | ContainerContent::Nodes(_) => None,
        }
    }

    pub fn selected_nodes(&self) -> impl Iterator<Item = &VisualNode> {
        self.nodes().iter().filter(|node| node.selected)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Marks exactly the node at `position` as selected (or none).
    pub fn project_selection(&mut self, position: Option<usize>) {
        for node in self.nodes_mut() {
            node.selected = node.is_table() && Some(node.position) == position;
        }
    }
}

/// Replaces the container's content with the nodes for `layout`.
///
/// Prior content is always dropped first, so calling this repeatedly yields
/// the same result. Nodes come out unselected; the selection is projected
/// afterwards with [`LayoutContainer::project_selection`].
pub fn render(container: &mut LayoutContainer, layout: &CanonicalLayout) {
    container.clear();

    if !layout.is_available() {
        container.content = ContainerContent::Placeholder(NO_LAYOUT_MESSAGE.to_string());
        return;
    }

    container.width = Some(format!("{}px", layout.width));
    container.height = Some(format!("{}px", layout.height));
    container.background = Some(CONTAINER_BACKGROUND.to_string());

    if layout.elements.is_empty() {
        container.content = ContainerContent::Placeholder(NO_ELEMENTS_MESSAGE.to_string());
        return;
    }

    let nodes = layout
        .elements
        .iter()
        .enumerate()
        .map(|(position, element)| VisualNode::from_element(position, element))
        .collect();
    container.content = ContainerContent::Nodes(nodes);
}
