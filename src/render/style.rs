//! Static stylesheet shared by every page.

/// Contents of `pages/style.css`.
pub const STYLESHEET_CSS: &str = "\
.error, .error a { color: red }
.example, .example a { color: grey }
.relation { color: grey; font-size: 0.8em }
#paths li { padding-bottom: 0.5em }
.excluded { text-decoration: line-through }
";
