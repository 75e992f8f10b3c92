//! The diagram declaration API.
//!
//! A [`Diagram`] is a mutable handle that collects declarations and renders
//! them on [`Diagram::finalize`]. Declarations are validated as they are
//! made: an unknown icon category, an unbalanced group or a reference from
//! another diagram is reported by the call that caused it, and the first
//! such error also marks the diagram so it can no longer finalize.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use log::{debug, error, info, trace};

use stencil_core::{
    catalog,
    color::Color,
    draw::StrokeStyle,
    identifier::Id,
    model::{self, DiagramModel, Direction, Endpoint},
};

use crate::{
    config::{OutputFormat, RenderAttributes},
    error::Error,
    export, layout,
};

/// Process-wide diagram token counter. Refs remember which diagram issued
/// them, so using a ref against another diagram is detected immediately.
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Reference to a declared node. Only valid with the diagram that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef {
    id: Id,
    token: u64,
}

/// Reference to a declared group. Only valid with the diagram that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRef {
    id: Id,
    token: u64,
}

/// Reference to a declared connection. Only valid with the diagram that
/// issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef {
    index: usize,
    token: u64,
}

/// Either end of a connection.
#[derive(Debug, Clone, Copy)]
pub struct EndpointRef {
    endpoint: Endpoint,
    token: u64,
}

impl From<NodeRef> for EndpointRef {
    fn from(node: NodeRef) -> Self {
        Self {
            endpoint: Endpoint::Node(node.id),
            token: node.token,
        }
    }
}

impl From<GroupRef> for EndpointRef {
    fn from(group: GroupRef) -> Self {
        Self {
            endpoint: Endpoint::Group(group.id),
            token: group.token,
        }
    }
}

/// Declarative description of one connection.
///
/// # Examples
///
/// ```
/// use stencil::{Direction, Edge, StrokeStyle};
///
/// let edge = Edge::default()
///     .label("2. renew lease")
///     .style(StrokeStyle::Dashed)
///     .direction(Direction::Both);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Edge {
    direction: Direction,
    label: Option<String>,
    style: StrokeStyle,
    color: Color,
}

impl Edge {
    /// Sets the label. Line breaks are preserved exactly as given.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// A diagram being declared.
///
/// # Examples
///
/// ```no_run
/// use stencil::{Diagram, Edge, RenderAttributes};
///
/// # fn main() -> Result<(), stencil::Error> {
/// let mut diagram = Diagram::begin("demo", "demo.svg", RenderAttributes::default())?;
/// let client = diagram.node("user", "Client")?;
/// let api = diagram.node("server", "API")?;
/// diagram.connect(client, api, Edge::default().label("HTTPS"))?;
/// diagram.finalize()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Diagram {
    name: String,
    output_path: PathBuf,
    format: OutputFormat,
    attributes: RenderAttributes,
    token: u64,
    nodes: Vec<model::Node>,
    groups: Vec<model::Group>,
    edges: Vec<model::Edge>,
    group_stack: Vec<Id>,
    next_node: usize,
    failure: Option<String>,
    finalized: Option<PathBuf>,
}

impl Diagram {
    /// Starts a new diagram writing to `output_path`.
    ///
    /// The output format is taken from `attributes`, or inferred from the
    /// path extension when unset. The path's directory is created if needed
    /// and probed for writability, so an impossible output location fails
    /// here instead of after all declarations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for invalid attributes, an
    /// undeterminable output format, or an unwritable output path.
    pub fn begin(
        name: impl Into<String>,
        output_path: impl AsRef<Path>,
        attributes: RenderAttributes,
    ) -> Result<Self, Error> {
        let name = name.into();
        let output_path = output_path.as_ref().to_path_buf();

        attributes.validate()?;
        let format = match attributes.format() {
            Some(format) => format,
            None => OutputFormat::from_path(&output_path).ok_or_else(|| {
                Error::Configuration(format!(
                    "Cannot infer output format from path '{}'; expected .svg, .png or .pdf",
                    output_path.display()
                ))
            })?,
        };
        probe_writable(&output_path)?;

        info!(
            name = name,
            output_path = output_path.display().to_string(),
            format:?;
            "Beginning diagram"
        );

        Ok(Self {
            name,
            output_path,
            format,
            attributes,
            token: NEXT_TOKEN.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
            groups: Vec::new(),
            edges: Vec::new(),
            group_stack: Vec::new(),
            next_node: 0,
            failure: None,
            finalized: None,
        })
    }

    /// Declares a node of the given catalog category.
    ///
    /// The node lands in the innermost open group, or at the diagram root.
    /// `label` is free text and keeps its line breaks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] when `category` is not in the
    /// icon catalog; the diagram is then marked failed.
    pub fn node(&mut self, category: &str, label: impl Into<String>) -> Result<NodeRef, Error> {
        let icon = match catalog::resolve(category) {
            Ok(icon) => icon,
            Err(err) => return Err(self.fail(err.into())),
        };

        let id = Id::from_anonymous(self.next_node);
        self.next_node += 1;
        let parent = self.group_stack.last().copied();
        let label = label.into();
        trace!(id = id.to_string(), category, label; "Declared node");

        self.nodes.push(model::Node::new(id, label, icon, parent));
        Ok(NodeRef {
            id,
            token: self.token,
        })
    }

    /// Opens a named group. Everything declared until the matching
    /// [`Diagram::end_group`] lands inside it.
    pub fn begin_group(&mut self, name: impl Into<String>) -> Result<GroupRef, Error> {
        let name = name.into();
        let parent = self.group_stack.last().copied();
        let id = self.unique_group_id(&name, parent);
        trace!(id = id.to_string(), name; "Opened group");

        self.groups.push(model::Group::new(id, name, parent));
        self.group_stack.push(id);
        Ok(GroupRef {
            id,
            token: self.token,
        })
    }

    /// Closes the innermost open group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnbalancedGroup`] when no group is open; the
    /// diagram is then marked failed.
    pub fn end_group(&mut self) -> Result<(), Error> {
        match self.group_stack.pop() {
            Some(id) => {
                trace!(id = id.to_string(); "Closed group");
                Ok(())
            }
            None => Err(self.fail(Error::UnbalancedGroup(
                "end_group called with no open group".to_string(),
            ))),
        }
    }

    /// Declares a group around everything `body` declares.
    ///
    /// The group is closed when `body` returns, whether it succeeded or
    /// not, so the group stack stays balanced either way.
    pub fn group<F>(&mut self, name: impl Into<String>, body: F) -> Result<GroupRef, Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        let group_ref = self.begin_group(name)?;
        let outcome = body(self);
        self.end_group()?;
        outcome?;

        Ok(group_ref)
    }

    /// Declares a connection between two previously declared endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingReference`] when either ref was issued by
    /// a different diagram; the diagram is then marked failed.
    pub fn connect(
        &mut self,
        source: impl Into<EndpointRef>,
        target: impl Into<EndpointRef>,
        edge: Edge,
    ) -> Result<EdgeRef, Error> {
        let source = source.into();
        let target = target.into();

        for endpoint in [&source, &target] {
            if endpoint.token != self.token {
                return Err(self.fail(Error::DanglingReference(format!(
                    "Endpoint {} belongs to a different diagram",
                    endpoint.endpoint.id()
                ))));
            }
        }

        self.edges.push(model::Edge::new(
            source.endpoint,
            target.endpoint,
            edge.direction,
            edge.label,
            edge.style,
            edge.color,
        ));
        Ok(EdgeRef {
            index: self.edges.len() - 1,
            token: self.token,
        })
    }

    /// Lays out the declarations and writes the output file.
    ///
    /// Finalization is idempotent: the first successful call renders and
    /// writes, later calls return the same path without re-rendering.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnbalancedGroup`] when groups are still open,
    /// [`Error::Configuration`] when an earlier declaration failed, and
    /// layout or export errors otherwise. No output file is produced on
    /// any error.
    pub fn finalize(&mut self) -> Result<PathBuf, Error> {
        if let Some(path) = &self.finalized {
            debug!(name = self.name; "Diagram already finalized");
            return Ok(path.clone());
        }

        if let Some(message) = &self.failure {
            return Err(Error::Configuration(format!(
                "Diagram '{}' cannot be rendered after a declaration error: {message}",
                self.name
            )));
        }
        if !self.group_stack.is_empty() {
            return Err(self.fail(Error::UnbalancedGroup(format!(
                "{} group(s) still open at finalization",
                self.group_stack.len()
            ))));
        }

        info!(
            name = self.name,
            node_count = self.nodes.len(),
            edge_count = self.edges.len();
            "Finalizing diagram"
        );
        let model = DiagramModel::new(
            self.name.clone(),
            self.nodes.clone(),
            self.groups.clone(),
            self.edges.clone(),
        );
        let scene = layout::layout(&model, &self.attributes)?;
        export::export(&scene, &self.attributes, &self.output_path, self.format)?;

        self.finalized = Some(self.output_path.clone());
        Ok(self.output_path.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Records the first declaration failure and passes the error through.
    fn fail(&mut self, err: Error) -> Error {
        if self.failure.is_none() {
            self.failure = Some(err.to_string());
        }
        err
    }

    fn unique_group_id(&self, name: &str, parent: Option<Id>) -> Id {
        let base = match parent {
            Some(parent_id) => parent_id.create_nested(Id::new(name)),
            None => Id::new(name),
        };

        let mut id = base;
        let mut occurrence = 2;
        while self.groups.iter().any(|group| group.id() == id) {
            id = Id::new(&format!("{base}#{occurrence}"));
            occurrence += 1;
        }
        id
    }
}

impl Drop for Diagram {
    /// Renders the diagram if it was cleanly declared but never finalized,
    /// mirroring scope-exit rendering in scripting front ends. Failed or
    /// unbalanced diagrams are left alone.
    fn drop(&mut self) {
        if self.finalized.is_some() || self.failure.is_some() || !self.group_stack.is_empty() {
            return;
        }

        if let Err(err) = self.finalize() {
            error!(name = self.name, err:err; "Failed to render diagram on drop");
        }
    }
}

/// Probes that the output location can be written, creating its directory.
fn probe_writable(path: &Path) -> Result<(), Error> {
    let directory = export::output_directory(path);
    fs::create_dir_all(directory).map_err(|err| {
        Error::Configuration(format!(
            "Cannot create output directory '{}': {err}",
            directory.display()
        ))
    })?;

    tempfile::NamedTempFile::new_in(directory)
        .map(drop)
        .map_err(|err| {
            Error::Configuration(format!(
                "Output path '{}' is not writable: {err}",
                path.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn begin_in(dir: &Path, file: &str) -> Diagram {
        Diagram::begin("test", dir.join(file), RenderAttributes::default()).unwrap()
    }

    #[test]
    fn test_unknown_category_reported_and_poisons() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagram = begin_in(dir.path(), "out.svg");
        diagram.node("server", "ok").unwrap();

        let err = diagram.node("teapot", "bad").unwrap_err();
        assert!(matches!(err, Error::UnknownCategory(_)));

        let finalize_err = diagram.finalize().unwrap_err();
        assert!(finalize_err.to_string().contains("teapot"));
        assert!(!dir.path().join("out.svg").exists());
    }

    #[test]
    fn test_end_group_without_open_group() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagram = begin_in(dir.path(), "out.svg");

        assert!(matches!(
            diagram.end_group(),
            Err(Error::UnbalancedGroup(_))
        ));
    }

    #[test]
    fn test_open_group_blocks_finalize() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagram = begin_in(dir.path(), "out.svg");
        diagram.begin_group("left open").unwrap();
        diagram.node("server", "inside").unwrap();

        assert!(matches!(
            diagram.finalize(),
            Err(Error::UnbalancedGroup(_))
        ));
        assert!(!dir.path().join("out.svg").exists());
    }

    #[test]
    fn test_foreign_ref_is_dangling() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = begin_in(dir.path(), "first.svg");
        let mut second = begin_in(dir.path(), "second.svg");

        let foreign = first.node("server", "foreign").unwrap();
        let local = second.node("server", "local").unwrap();

        let err = second.connect(local, foreign, Edge::default()).unwrap_err();
        assert!(matches!(err, Error::DanglingReference(_)));
        assert!(second.finalize().is_err());
    }

    #[test]
    fn test_connect_returns_distinct_edge_refs() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagram = begin_in(dir.path(), "out.svg");

        let a = diagram.node("server", "a").unwrap();
        let b = diagram.node("server", "b").unwrap();
        let first = diagram.connect(a, b, Edge::default()).unwrap();
        let second = diagram.connect(b, a, Edge::default()).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_group_closure_balances_on_body_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagram = begin_in(dir.path(), "out.svg");

        let result = diagram.group("cluster", |d| {
            d.node("server", "inside")?;
            d.node("teapot", "bad")?;
            Ok(())
        });
        assert!(result.is_err());

        // The group was closed despite the body error, so a later
        // end_group is the caller's own imbalance.
        assert!(matches!(
            diagram.end_group(),
            Err(Error::UnbalancedGroup(_))
        ));
    }

    #[test]
    fn test_unknown_extension_rejected_at_begin() {
        let dir = tempfile::tempdir().unwrap();
        let err = Diagram::begin(
            "test",
            dir.path().join("out.gif"),
            RenderAttributes::default(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let dir = tempfile::tempdir().unwrap();
        let attributes = RenderAttributes::default().with_format(OutputFormat::Svg);
        let mut diagram =
            Diagram::begin("test", dir.path().join("no_extension"), attributes).unwrap();
        diagram.node("server", "only").unwrap();

        let path = diagram.finalize().unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("<svg"));
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagram = begin_in(dir.path(), "out.svg");
        diagram.node("server", "only").unwrap();

        let first = diagram.finalize().unwrap();
        let written = fs::read(&first).unwrap();
        let second = diagram.finalize().unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read(&second).unwrap(), written);
    }

    #[test]
    fn test_nodes_land_in_open_group() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagram = begin_in(dir.path(), "out.svg");

        diagram.begin_group("pool").unwrap();
        diagram.node("server", "inside").unwrap();
        diagram.end_group().unwrap();
        diagram.node("server", "outside").unwrap();

        assert_eq!(diagram.nodes[0].parent(), Some(diagram.groups[0].id()));
        assert_eq!(diagram.nodes[1].parent(), None);
    }

    #[test]
    fn test_duplicate_group_names_stay_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagram = begin_in(dir.path(), "out.svg");

        let first = diagram.group("replica", |_| Ok(())).unwrap();
        let second = diagram.group("replica", |_| Ok(())).unwrap();

        assert_ne!(first.id, second.id);
        assert!(diagram.finalize().is_ok());
    }

    #[test]
    fn test_group_endpoint_connection() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagram = begin_in(dir.path(), "out.svg");

        let client = diagram.node("user", "Client").unwrap();
        let pool = diagram
            .group("pool", |d| {
                d.node("server", "a")?;
                d.node("server", "b")?;
                Ok(())
            })
            .unwrap();

        diagram.connect(client, pool, Edge::default()).unwrap();
        assert!(diagram.finalize().is_ok());
    }

    #[test]
    fn test_drop_renders_clean_unfinalized_diagram() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dropped.svg");
        {
            let mut diagram =
                Diagram::begin("test", &path, RenderAttributes::default()).unwrap();
            diagram.node("server", "only").unwrap();
        }

        assert!(path.exists());
    }

    #[test]
    fn test_drop_skips_poisoned_diagram() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poisoned.svg");
        {
            let mut diagram =
                Diagram::begin("test", &path, RenderAttributes::default()).unwrap();
            let _ = diagram.node("teapot", "bad");
        }

        assert!(!path.exists());
    }
}
