//! Source emitters for compiled descriptors.
//!
//! An emitter serializes a [`TableDescriptor`] into a lookup construct in a
//! target language. The generated code must agree with
//! [`TableDescriptor::lookup`] for every value, and render unknown values
//! in the `Type(value)` fallback form.

use crate::descriptor::TableDescriptor;
use crate::naming::{ConstValue, Declaration};
use crate::record::format_bits;
use crate::run::Run;
use crate::strategy::Strategy;
use crate::table::{NameTable, SparseTable, Tables};
use std::fmt::{self, Write};

/// Generator version written into every file header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Writes the lookup construct for one descriptor.
pub trait Emit {
    fn emit(&self, descriptor: &TableDescriptor, out: &mut dyn Write) -> fmt::Result;
}

/// Emits a Go `String()` method per type, in the shape of `go generate` stringers.
///
/// - `OneRun`: a name constant and an index array, indexed after an offset.
/// - `MultiRun`: per-run constants and a `switch` of range tests.
/// - `SparseMap`: a single name constant and a `map` of slices into it.
#[derive(Debug, Clone)]
pub struct GoEmitter {
    package: String,
    command: Option<String>,
}

impl GoEmitter {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            command: None,
        }
    }

    /// Records the invocation that produced the file in its header.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Writes a complete Go file holding every descriptor.
    pub fn emit_file(&self, descriptors: &[TableDescriptor], out: &mut dyn Write) -> fmt::Result {
        self.emit_header(out)?;
        for descriptor in descriptors {
            writeln!(out)?;
            self.emit(descriptor, out)?;
        }
        Ok(())
    }

    /// Like [`GoEmitter::emit_file`], with a value guard ahead of each type.
    ///
    /// Each descriptor is paired with the declarations it was collected from.
    pub fn emit_file_with_guards(
        &self,
        types: &[(&TableDescriptor, &[Declaration])],
        out: &mut dyn Write,
    ) -> fmt::Result {
        self.emit_header(out)?;
        for (descriptor, declarations) in types {
            writeln!(out)?;
            self.emit_value_guard(declarations, out)?;
            writeln!(out)?;
            self.emit(descriptor, out)?;
        }
        Ok(())
    }

    /// Writes a `func _()` that stops compiling once a constant changes value.
    ///
    /// Uses the declared names, before any naming policy. Blank and
    /// non-integer declarations are skipped.
    pub fn emit_value_guard(&self, declarations: &[Declaration], out: &mut dyn Write) -> fmt::Result {
        writeln!(out, "func _() {{")?;
        writeln!(
            out,
            "\t// An \"invalid array index\" compiler error signifies that the constant values have changed."
        )?;
        writeln!(out, "\t// Re-run the stringer command to generate them again.")?;
        writeln!(out, "\tvar x [1]struct{{}}")?;
        for decl in declarations {
            if decl.name == "_" {
                continue;
            }
            let value = match &decl.value {
                ConstValue::Signed(v) => v.to_string(),
                ConstValue::Unsigned(v) => v.to_string(),
                ConstValue::NonInteger { .. } => continue,
            };
            writeln!(out, "\t_ = x[{} - {value}]", decl.name)?;
        }
        writeln!(out, "}}")
    }

    fn emit_header(&self, out: &mut dyn Write) -> fmt::Result {
        writeln!(out, "// Code generated by \"stringer-rs\"; DO NOT EDIT.")?;
        if let Some(command) = &self.command {
            writeln!(out, "// Exec: {}", go_quote(command))?;
        }
        writeln!(out, "// Version: {VERSION}")?;
        writeln!(out)?;
        writeln!(out, "package {}", self.package)?;
        writeln!(out)?;
        // Used by every fallback path
        writeln!(out, "import \"strconv\"")
    }

    fn emit_one_run(&self, d: &TableDescriptor, run: &Run, table: &NameTable, out: &mut dyn Write) -> fmt::Result {
        let ty = d.type_name();
        writeln!(out, "const _{ty}_name = {}", go_quote(table.blob()))?;
        writeln!(out)?;
        writeln!(out, "var _{ty}_index = {}", index_array(table))?;
        writeln!(out)?;

        let min = literal(d, run.min());
        let less_than_zero = if d.signed() { "i < 0 || " } else { "" };
        writeln!(out, "func (i {ty}) String() string {{")?;
        if run.min() == 0 {
            writeln!(out, "\tif {less_than_zero}i >= {ty}(len(_{ty}_index)-1) {{")?;
            writeln!(out, "\t\treturn {}", fallback(d, "i"))?;
        } else {
            writeln!(out, "\ti -= {min}")?;
            writeln!(out, "\tif {less_than_zero}i >= {ty}(len(_{ty}_index)-1) {{")?;
            writeln!(out, "\t\treturn {}", fallback(d, &format!("i + {min}")))?;
        }
        writeln!(out, "\t}}")?;
        writeln!(out, "\treturn _{ty}_name[_{ty}_index[i]:_{ty}_index[i+1]]")?;
        writeln!(out, "}}")
    }

    fn emit_multi_run(&self, d: &TableDescriptor, tables: &[NameTable], out: &mut dyn Write) -> fmt::Result {
        let ty = d.type_name();

        writeln!(out, "const (")?;
        for (i, table) in tables.iter().enumerate() {
            writeln!(out, "\t_{ty}_name_{i} = {}", go_quote(table.blob()))?;
        }
        writeln!(out, ")")?;
        writeln!(out)?;

        // Single-member runs return their name constant directly
        let indexed: Vec<_> = d
            .runs()
            .iter()
            .zip(tables)
            .enumerate()
            .filter(|(_, (run, _))| run.len() > 1)
            .collect();
        if !indexed.is_empty() {
            writeln!(out, "var (")?;
            for (i, (_, table)) in &indexed {
                writeln!(out, "\t_{ty}_index_{i} = {}", index_array(table))?;
            }
            writeln!(out, ")")?;
            writeln!(out)?;
        }

        writeln!(out, "func (i {ty}) String() string {{")?;
        writeln!(out, "\tswitch {{")?;
        for (i, run) in d.runs().iter().enumerate() {
            let min = literal(d, run.min());
            let max = literal(d, run.max());
            if run.len() == 1 {
                writeln!(out, "\tcase i == {min}:")?;
                writeln!(out, "\t\treturn _{ty}_name_{i}")?;
                continue;
            }
            if run.min() == 0 && !d.signed() {
                // 0 <= i is always true for unsigned types
                writeln!(out, "\tcase i <= {max}:")?;
            } else {
                writeln!(out, "\tcase {min} <= i && i <= {max}:")?;
            }
            if run.min() != 0 {
                writeln!(out, "\t\ti -= {min}")?;
            }
            writeln!(out, "\t\treturn _{ty}_name_{i}[_{ty}_index_{i}[i]:_{ty}_index_{i}[i+1]]")?;
        }
        writeln!(out, "\tdefault:")?;
        writeln!(out, "\t\treturn {}", fallback(d, "i"))?;
        writeln!(out, "\t}}")?;
        writeln!(out, "}}")
    }

    fn emit_map(&self, d: &TableDescriptor, table: &SparseTable, out: &mut dyn Write) -> fmt::Result {
        let ty = d.type_name();
        writeln!(out, "const _{ty}_name = {}", go_quote(table.blob()))?;
        writeln!(out)?;

        // Entries follow run order so the output is reproducible
        writeln!(out, "var _{ty}_map = map[{ty}]string{{")?;
        for record in d.runs().iter().flat_map(Run::records) {
            if let Some((start, end)) = table.span(record.value) {
                writeln!(out, "\t{}: _{ty}_name[{start}:{end}],", literal(d, record.value))?;
            }
        }
        writeln!(out, "}}")?;
        writeln!(out)?;

        writeln!(out, "func (i {ty}) String() string {{")?;
        writeln!(out, "\tif str, ok := _{ty}_map[i]; ok {{")?;
        writeln!(out, "\t\treturn str")?;
        writeln!(out, "\t}}")?;
        writeln!(out, "\treturn {}", fallback(d, "i"))?;
        writeln!(out, "}}")
    }
}

impl Emit for GoEmitter {
    fn emit(&self, descriptor: &TableDescriptor, out: &mut dyn Write) -> fmt::Result {
        match (descriptor.strategy(), descriptor.tables()) {
            (Strategy::OneRun, Tables::Runs(tables)) => match (descriptor.runs().first(), tables.first()) {
                (Some(run), Some(table)) => self.emit_one_run(descriptor, run, table, out),
                _ => Err(fmt::Error),
            },
            (Strategy::MultiRun, Tables::Runs(tables)) => self.emit_multi_run(descriptor, tables, out),
            (Strategy::SparseMap, Tables::Sparse(table)) => self.emit_map(descriptor, table, out),
            _ => Err(fmt::Error),
        }
    }
}

/// Formats a value as a Go integer literal.
fn literal(d: &TableDescriptor, value: u64) -> String {
    format_bits(value, d.signed())
}

/// Go expression rendering `expr` in the fallback form.
fn fallback(d: &TableDescriptor, expr: &str) -> String {
    let ty = d.type_name();
    if d.signed() {
        format!("\"{ty}(\" + strconv.FormatInt(int64({expr}), 10) + \")\"")
    } else {
        format!("\"{ty}(\" + strconv.FormatUint(uint64({expr}), 10) + \")\"")
    }
}

/// Go array literal for a table's offsets, e.g. `[...]uint8{0, 1, 2}`.
fn index_array(table: &NameTable) -> String {
    let offsets: Vec<String> = table.offsets().iter().map(|o| o.to_string()).collect();
    format!("[...]uint{}{{{}}}", table.width().bits(), offsets.join(", "))
}

/// Quotes `s` as a Go interpreted string literal.
fn go_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ConstantRecord;

    fn emit(d: &TableDescriptor) -> String {
        let mut out = String::new();
        GoEmitter::new("demo").emit(d, &mut out).unwrap();
        out
    }

    fn unsigned(pairs: &[(&str, u64)]) -> Vec<ConstantRecord> {
        pairs
            .iter()
            .map(|&(name, value)| ConstantRecord::unsigned(name, value))
            .collect()
    }

    #[test]
    fn test_one_run_from_zero() {
        let d = TableDescriptor::compile("Letter", unsigned(&[("A", 0), ("B", 1), ("C", 2)])).unwrap();
        let expected = "\
const _Letter_name = \"ABC\"

var _Letter_index = [...]uint8{0, 1, 2, 3}

func (i Letter) String() string {
\tif i >= Letter(len(_Letter_index)-1) {
\t\treturn \"Letter(\" + strconv.FormatUint(uint64(i), 10) + \")\"
\t}
\treturn _Letter_name[_Letter_index[i]:_Letter_index[i+1]]
}
";
        assert_eq!(emit(&d), expected);
    }

    #[test]
    fn test_one_run_signed_with_offset() {
        let records = vec![
            ConstantRecord::signed("Low", -1),
            ConstantRecord::signed("Mid", 0),
            ConstantRecord::signed("High", 1),
        ];
        let d = TableDescriptor::compile("Level", records).unwrap();
        let out = emit(&d);
        assert!(out.contains("\ti -= -1\n"));
        assert!(out.contains("\tif i < 0 || i >= Level(len(_Level_index)-1) {\n"));
        assert!(out.contains("strconv.FormatInt(int64(i + -1), 10)"));
    }

    #[test]
    fn test_multi_run_switch() {
        let d = TableDescriptor::compile("Code", unsigned(&[("A", 0), ("B", 1), ("C", 5), ("D", 7), ("E", 8)]))
            .unwrap();
        let expected = "\
const (
\t_Code_name_0 = \"AB\"
\t_Code_name_1 = \"C\"
\t_Code_name_2 = \"DE\"
)

var (
\t_Code_index_0 = [...]uint8{0, 1, 2}
\t_Code_index_2 = [...]uint8{0, 1, 2}
)

func (i Code) String() string {
\tswitch {
\tcase i <= 1:
\t\treturn _Code_name_0[_Code_index_0[i]:_Code_index_0[i+1]]
\tcase i == 5:
\t\treturn _Code_name_1
\tcase 7 <= i && i <= 8:
\t\ti -= 7
\t\treturn _Code_name_2[_Code_index_2[i]:_Code_index_2[i+1]]
\tdefault:
\t\treturn \"Code(\" + strconv.FormatUint(uint64(i), 10) + \")\"
\t}
}
";
        assert_eq!(emit(&d), expected);
    }

    #[test]
    fn test_sparse_map() {
        let records: Vec<_> = (0..11u64)
            .map(|i| ConstantRecord::signed(format!("S{i}"), (i as i64) * 3 - 6))
            .collect();
        let d = TableDescriptor::compile("Sparse", records).unwrap();
        let out = emit(&d);
        assert!(out.starts_with("const _Sparse_name = \"S0S1S2S3S4S5S6S7S8S9S10\"\n"));
        assert!(out.contains("\t-6: _Sparse_name[0:2],\n"));
        assert!(out.contains("\t24: _Sparse_name[20:23],\n"));
        assert!(out.contains("\treturn \"Sparse(\" + strconv.FormatInt(int64(i), 10) + \")\"\n"));
    }

    #[test]
    fn test_emit_is_deterministic() {
        let records: Vec<_> = (0..20u64)
            .map(|i| ConstantRecord::unsigned(format!("K{i}"), i * i))
            .collect();
        let a = TableDescriptor::compile("K", records.clone()).unwrap();
        let b = TableDescriptor::compile("K", records).unwrap();
        assert_eq!(emit(&a), emit(&b));
    }

    #[test]
    fn test_file_header() {
        let d = TableDescriptor::compile("T", unsigned(&[("A", 0)])).unwrap();
        let mut out = String::new();
        GoEmitter::new("demo").emit_file(&[d], &mut out).unwrap();
        let expected = format!(
            "// Code generated by \"stringer-rs\"; DO NOT EDIT.\n// Version: {VERSION}\n\npackage demo\n\nimport \"strconv\"\n\n"
        );
        assert!(out.starts_with(&expected));
        assert!(out.contains("func (i T) String() string {"));
    }

    #[test]
    fn test_file_header_records_command() {
        let mut out = String::new();
        GoEmitter::new("demo")
            .with_command("stringer-rs -t Pill")
            .emit_file(&[], &mut out)
            .unwrap();
        assert!(out.contains("\n// Exec: \"stringer-rs -t Pill\"\n// Version: "));
    }

    #[test]
    fn test_value_guard() {
        let decls = vec![
            Declaration::new("PillPlacebo", ConstValue::Signed(0)),
            Declaration::new("_", ConstValue::Signed(1)),
            Declaration::new("PillLow", ConstValue::Signed(-2)),
            Declaration::new("PillBig", ConstValue::Unsigned(u64::MAX)),
            Declaration::new("Half", ConstValue::NonInteger { kind: "float".into() }),
        ];
        let mut out = String::new();
        GoEmitter::new("demo").emit_value_guard(&decls, &mut out).unwrap();
        let expected = "\
func _() {
\t// An \"invalid array index\" compiler error signifies that the constant values have changed.
\t// Re-run the stringer command to generate them again.
\tvar x [1]struct{}
\t_ = x[PillPlacebo - 0]
\t_ = x[PillLow - -2]
\t_ = x[PillBig - 18446744073709551615]
}
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_file_with_guards() {
        let decls = vec![
            Declaration::new("A", ConstValue::Unsigned(0)),
            Declaration::new("B", ConstValue::Unsigned(1)),
        ];
        let records = crate::naming::NamingPolicy::default().collect(decls.clone()).unwrap();
        let d = TableDescriptor::compile("Letter", records).unwrap();

        let mut out = String::new();
        GoEmitter::new("demo")
            .emit_file_with_guards(&[(&d, decls.as_slice())], &mut out)
            .unwrap();
        let guard = out.find("func _() {").unwrap();
        let method = out.find("func (i Letter) String() string {").unwrap();
        assert!(guard < method);
        assert!(out.contains("\t_ = x[B - 1]\n"));
    }

    #[test]
    fn test_go_quote() {
        assert_eq!(go_quote("plain"), "\"plain\"");
        assert_eq!(go_quote("say \"hi\"\\"), "\"say \\\"hi\\\"\\\\\"");
        assert_eq!(go_quote("a\u{1}b"), "\"a\\u0001b\"");
    }
}
