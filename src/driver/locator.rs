//! Element locators.
//!
//! A [`Locator`] names an element by what it means on the page (a labelled
//! field, a table row, an option inside a listbox) rather than by a concrete
//! query string. Backends resolve it to a [`Query`] when they need one, so
//! workflow code never depends on the lookup mechanism.

use std::fmt;

/// Which part of a labelled form field to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPart {
    /// The `<label>` element itself.
    Label,
    /// The text input following the label.
    Input,
    /// The icon that opens a dropdown.
    Toggle,
    /// The text showing a dropdown's current value.
    Value,
}

/// Per-row controls in a results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowControl {
    /// The pencil icon that opens the edit form.
    Edit,
    /// The row selection checkbox.
    Select,
}

/// A semantic element locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Raw CSS selector.
    Css(String),
    /// Raw XPath expression.
    XPath(String),
    /// Element of `tag` whose text contains `text`.
    HasText { tag: String, text: String },
    /// Part of the form field labelled `label`.
    Label { label: String, part: FieldPart },
    /// Element with ARIA `role`, optionally nested in an element with role `within`.
    Role { role: String, within: Option<String> },
    /// Input with the given placeholder.
    Placeholder(String),
    /// Results-table cell whose text is exactly the given value.
    Cell(String),
    /// Column `column` (1-based) of the row holding `row`.
    RowColumn { row: String, column: usize },
    /// Control inside the row holding `row`.
    RowControl { row: String, control: RowControl },
}

/// Lookup strategy understood by automation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Css,
    XPath,
}

impl Strategy {
    /// W3C WebDriver `using` value.
    pub fn as_webdriver(self) -> &'static str {
        match self {
            Strategy::Css => "css selector",
            Strategy::XPath => "xpath",
        }
    }
}

/// A concrete query produced from a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub strategy: Strategy,
    pub value: String,
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    pub fn has_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::HasText {
            tag: tag.into(),
            text: text.into(),
        }
    }

    pub fn label(label: impl Into<String>, part: FieldPart) -> Self {
        Self::Label {
            label: label.into(),
            part,
        }
    }

    pub fn role(role: impl Into<String>, within: Option<&str>) -> Self {
        Self::Role {
            role: role.into(),
            within: within.map(String::from),
        }
    }

    /// Address the first match.
    pub fn first(&self) -> Target {
        self.nth(0)
    }

    /// Address the match at `index` (zero-based).
    pub fn nth(&self, index: usize) -> Target {
        Target {
            locator: self.clone(),
            index,
        }
    }

    /// Resolve to a concrete query.
    pub fn query(&self) -> Query {
        match self {
            Locator::Css(selector) => Query {
                strategy: Strategy::Css,
                value: selector.clone(),
            },
            other => Query {
                strategy: Strategy::XPath,
                value: other.to_xpath(),
            },
        }
    }

    fn to_xpath(&self) -> String {
        match self {
            Locator::Css(selector) => selector.clone(),
            Locator::XPath(expr) => expr.clone(),
            Locator::HasText { tag, text } => {
                format!("//{}[contains(normalize-space(.), {})]", tag, literal(text))
            }
            Locator::Label { label, part } => {
                let base = format!("//label[text()={}]", literal(label));
                match part {
                    FieldPart::Label => base,
                    FieldPart::Input => format!("{}/../following-sibling::div//input", base),
                    FieldPart::Toggle => format!("{}/../following-sibling::div//i", base),
                    FieldPart::Value => format!("{}/../following-sibling::div//span", base),
                }
            }
            Locator::Role { role, within } => match within {
                Some(outer) => format!(
                    "//*[@role={}]//*[@role={}]",
                    literal(outer),
                    literal(role)
                ),
                None => format!("//*[@role={}]", literal(role)),
            },
            Locator::Placeholder(text) => format!("//input[@placeholder={}]", literal(text)),
            Locator::Cell(text) => format!(
                "//div[@class='oxd-table-body']//div[text()={}]",
                literal(text)
            ),
            Locator::RowColumn { row, column } => {
                format!("//div[text()={}]/../../div[{}]", literal(row), column)
            }
            Locator::RowControl { row, control } => {
                let control = match control {
                    RowControl::Edit => "i[contains(@class,'bi-pencil')]",
                    RowControl::Select => "input[@type='checkbox']",
                };
                format!("//div[text()={}]/../../..//{}", literal(row), control)
            }
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css `{}`", s),
            Locator::XPath(s) => write!(f, "xpath `{}`", s),
            Locator::HasText { tag, text } => write!(f, "<{}> containing '{}'", tag, text),
            Locator::Label { label, part } => write!(f, "{:?} of field '{}'", part, label),
            Locator::Role { role, within } => match within {
                Some(outer) => write!(f, "role '{}' within '{}'", role, outer),
                None => write!(f, "role '{}'", role),
            },
            Locator::Placeholder(p) => write!(f, "input with placeholder '{}'", p),
            Locator::Cell(text) => write!(f, "table cell '{}'", text),
            Locator::RowColumn { row, column } => write!(f, "column {} of row '{}'", column, row),
            Locator::RowControl { row, control } => write!(f, "{:?} control of row '{}'", control, row),
        }
    }
}

/// One element among the matches of a locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub locator: Locator,
    pub index: usize,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.index == 0 {
            write!(f, "{}", self.locator)
        } else {
            write!(f, "{} (match {})", self.locator, self.index + 1)
        }
    }
}

/// Quote a string as an XPath literal.
///
/// XPath 1.0 has no escape sequences, so strings holding both quote kinds
/// are assembled with `concat()`.
pub fn literal(s: &str) -> String {
    if !s.contains('\'') {
        format!("'{}'", s)
    } else if !s.contains('"') {
        format!("\"{}\"", s)
    } else {
        let parts: Vec<String> = s.split('\'').map(|p| format!("'{}'", p)).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_passes_through() {
        let q = Locator::css("div.oxd-toast").query();
        assert_eq!(q.strategy, Strategy::Css);
        assert_eq!(q.value, "div.oxd-toast");
    }

    #[test]
    fn label_parts_resolve_to_siblings() {
        let input = Locator::label("Username", FieldPart::Input).query();
        assert_eq!(input.strategy, Strategy::XPath);
        assert_eq!(
            input.value,
            "//label[text()='Username']/../following-sibling::div//input"
        );

        let toggle = Locator::label("User Role", FieldPart::Toggle).query();
        assert_eq!(
            toggle.value,
            "//label[text()='User Role']/../following-sibling::div//i"
        );
    }

    #[test]
    fn role_within_listbox() {
        let q = Locator::role("option", Some("listbox")).query();
        assert_eq!(q.value, "//*[@role='listbox']//*[@role='option']");
    }

    #[test]
    fn row_controls() {
        let edit = Locator::RowControl {
            row: "user_abc".into(),
            control: RowControl::Edit,
        };
        assert_eq!(
            edit.query().value,
            "//div[text()='user_abc']/../../..//i[contains(@class,'bi-pencil')]"
        );

        let col = Locator::RowColumn {
            row: "user_abc".into(),
            column: 3,
        };
        assert_eq!(col.query().value, "//div[text()='user_abc']/../../div[3]");
    }

    #[test]
    fn literal_quotes() {
        assert_eq!(literal("plain"), "'plain'");
        assert_eq!(literal("O'Brien"), "\"O'Brien\"");
        assert_eq!(
            literal(r#"say "hi" O'Brien"#),
            r#"concat('say "hi" O', "'", 'Brien')"#
        );
    }

    #[test]
    fn targets_and_display() {
        let loc = Locator::has_text("button", "Save");
        assert_eq!(loc.first().index, 0);
        assert_eq!(loc.nth(2).index, 2);
        assert_eq!(loc.first().to_string(), "<button> containing 'Save'");
        assert!(loc.nth(1).to_string().contains("match 2"));
    }
}
