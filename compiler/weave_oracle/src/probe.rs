//! Generation of the Go reflection probe.
//!
//! The probe is a standalone `main.go` that declares one zero value per
//! candidate type, walks each with `reflect`, and prints the resulting
//! descriptions as JSON on stdout. Field names and kind strings line up
//! with the serde model in `weave_ir`.

use weave_ir::TypeKind;

use crate::TypeCandidate;

/// Render the probe program for `candidates`, or `None` when no candidate
/// is a struct or interface (nothing to introspect).
pub(crate) fn render(candidates: &[TypeCandidate]) -> Option<String> {
    let mut imports: Vec<&str> = Vec::new();
    let mut body = String::new();
    let mut id = 0usize;

    for c in candidates {
        if !matches!(c.kind, TypeKind::Struct | TypeKind::Interface) {
            continue;
        }
        let alias = match imports.iter().position(|p| *p == c.pkg_path) {
            Some(i) => format!("i{}", i + 1),
            None => {
                imports.push(&c.pkg_path);
                format!("i{}", imports.len())
            }
        };
        id += 1;
        body.push_str(&format!("\tvar v{id} {alias}.{}\n", c.name));
        body.push_str(&format!("\tdata = append(data, describe(&v{id}))\n"));
    }
    if id == 0 {
        return None;
    }

    let mut unit = String::from("package main\n\n");
    unit.push_str("import (\n");
    unit.push_str("\t\"encoding/json\"\n\t\"fmt\"\n\t\"os\"\n\t\"reflect\"\n\n");
    for (i, path) in imports.iter().enumerate() {
        unit.push_str(&format!("\ti{} \"{path}\"\n", i + 1));
    }
    unit.push_str(")\n\n");
    unit.push_str("func main() {\n\tdata := []Type{}\n");
    unit.push_str(&body);
    unit.push_str(
        "\tout, err := json.Marshal(data)\n\
         \tif err != nil {\n\
         \t\tfmt.Fprintln(os.Stderr, err)\n\
         \t\tos.Exit(1)\n\
         \t}\n\
         \tos.Stdout.Write(out)\n\
         }\n\n",
    );
    unit.push_str(RUNTIME);
    Some(unit)
}

/// Reflection helpers shared by every probe.
const RUNTIME: &str = r#"type Field struct {
	Id        string
	Kind      string
	TypeName  string
	FieldName string
	PkgPath   string
}

type Method struct {
	Name string
	In   []Field
	Out  []Field
}

type Type struct {
	Id      string
	Kind    string
	Name    string
	PkgPath string
	Fields  []Field
	Methods []Method
}

func describe(v interface{}) Type {
	e := reflect.TypeOf(v).Elem()
	info := Type{
		Id:      fmt.Sprintf("%s.%s", e.PkgPath(), e.Name()),
		Kind:    e.Kind().String(),
		Name:    e.Name(),
		PkgPath: e.PkgPath(),
	}
	if e.Kind() == reflect.Struct {
		info.Fields = fieldsOf(e)
		info.Methods = methodsOf(reflect.TypeOf(v))
	} else if e.Kind() == reflect.Interface {
		info.Methods = methodsOf(e)
	}
	return info
}

func paramOf(t reflect.Type) Field {
	return Field{
		Id:        fmt.Sprintf("%s.%s", t.PkgPath(), t.Name()),
		Kind:      t.Kind().String(),
		TypeName:  t.Name(),
		FieldName: t.Name(),
		PkgPath:   t.PkgPath(),
	}
}

func fieldsOf(t reflect.Type) []Field {
	res := []Field{}
	for i := 0; i < t.NumField(); i++ {
		f := t.Field(i)
		p := paramOf(f.Type)
		p.FieldName = f.Name
		res = append(res, p)
	}
	return res
}

func methodsOf(t reflect.Type) []Method {
	res := []Method{}
	for i := 0; i < t.NumMethod(); i++ {
		m := t.Method(i)
		x := Method{Name: m.Name}
		for n := 0; n < m.Type.NumIn(); n++ {
			x.In = append(x.In, paramOf(m.Type.In(n)))
		}
		for n := 0; n < m.Type.NumOut(); n++ {
			x.Out = append(x.Out, paramOf(m.Type.Out(n)))
		}
		res = append(res, x)
	}
	return res
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, kind: TypeKind, name: &str, pkg_path: &str) -> TypeCandidate {
        TypeCandidate {
            id: id.into(),
            kind,
            name: name.into(),
            pkg_path: pkg_path.into(),
        }
    }

    #[test]
    fn renders_one_probe_line_per_candidate() {
        let program = render(&[
            candidate("a/cfg.Config", TypeKind::Struct, "Config", "a/cfg"),
            candidate("a/log.Logger", TypeKind::Interface, "Logger", "a/log"),
        ])
        .unwrap();
        assert!(program.contains("i1 \"a/cfg\""));
        assert!(program.contains("i2 \"a/log\""));
        assert!(program.contains("var v1 i1.Config"));
        assert!(program.contains("var v2 i2.Logger"));
        assert!(program.contains("describe(&v2)"));
    }

    #[test]
    fn shares_aliases_for_one_package() {
        let program = render(&[
            candidate("a/cfg.Config", TypeKind::Struct, "Config", "a/cfg"),
            candidate("a/cfg.Extra", TypeKind::Struct, "Extra", "a/cfg"),
        ])
        .unwrap();
        assert!(program.contains("var v2 i1.Extra"));
        assert!(!program.contains("i2 "));
    }

    #[test]
    fn non_structural_candidates_render_nothing() {
        assert!(render(&[candidate(".int", TypeKind::Int, "int", "")]).is_none());
    }
}
