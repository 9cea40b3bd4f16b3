//! Integration tests generating complete source files

use std::sync::Arc;

use codeweave::{
    args, Arg, BraceStyle, CharPool, CodeWriter, CommentStyle, Naming, Result, TemplateError,
    WriterOptions,
};

fn options() -> WriterOptions {
    WriterOptions::default().with_new_line("\n")
}

/// Generate a C#-style extension class for an enum
fn enum_extensions(writer: &mut CodeWriter, name: &str, members: &[&str]) -> Result<()> {
    writer
        .auto_generated_header()
        .nullable(true)
        .using("System")
        .new_line()
        .namespace("Demo.Generated")
        .new_line();

    writer.template("public static class {0}Extensions", &args![name])?;
    writer.try_bracket_block(|class| {
        class.template("public static string ToStringFast(this {0} value)", &args![name])?;
        class.try_bracket_block(|method| {
            method.write("switch (value)");
            method.try_bracket_block(|switch| {
                for member in members {
                    switch.template_line(
                        "case {0}.{1}: return nameof({0}.{1});",
                        &args![name, *member],
                    )?;
                }
                switch.write("default: return value.ToString();");
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })?;
    Ok(())
}

/// Test a multi-block generated file end to end
#[test]
fn test_generate_enum_extensions() {
    let pool = Arc::new(CharPool::new());
    let mut writer = CodeWriter::with_pool(Arc::clone(&pool), 0, options());
    enum_extensions(&mut writer, "Color", &["Red", "Green"]).unwrap();

    let expected = r#"// <auto-generated/>
#nullable enable
using System;

namespace Demo.Generated;

public static class ColorExtensions
{
    public static string ToStringFast(this Color value)
    {
        switch (value)
        {
            case Color.Red: return nameof(Color.Red);
            case Color.Green: return nameof(Color.Green);
            default: return value.ToString();
        }
    }
}"#;
    let source = writer.into_source("Color.Extensions.g.cs");
    assert_eq!(source.text, expected);
    assert_eq!(source.hint_name, "Color.Extensions.g.cs");
}

/// Test same-line braces with a callback body and a delimited parameter list
#[test]
fn test_generate_java_method() {
    let mut writer = CodeWriter::with_options(
        options()
            .with_indent("  ")
            .with_brace_style(BraceStyle::SameLine),
    );
    let params = vec!["int a", "int b"];
    let body = |w: &mut CodeWriter| -> Result<()> {
        w.write("int sum = a + b;").new_line().write("return sum;");
        Ok(())
    };

    writer.comment_with("Adds two numbers.", CommentStyle::Doc);
    writer
        .template("public int {0}({1:, })", &args![Naming::Camel.apply("Add Numbers"), params])
        .unwrap();
    writer.bracket_block(|method| {
        method.template("{0}", &[Arg::block(&body)]).unwrap();
    });

    assert_eq!(
        writer.to_string(),
        "/// Adds two numbers.\npublic int addNumbers(int a, int b) {\n  int sum = a + b;\n  return sum;\n}"
    );
}

/// Test a writer configured from TOML
#[test]
fn test_toml_configured_writer() {
    let options = WriterOptions::from_toml_str(
        r#"
        indent = "\t"
        new_line = "\r\n"
        "#,
    )
    .unwrap();
    let mut writer = CodeWriter::with_options(options);
    writer.write("class A").bracket_block(|body| {
        body.template("int {0};\nint {1};", &args!["x", "y"]).unwrap();
    });
    assert_eq!(writer.as_str(), "class A\r\n{\r\n\tint x;\r\n\tint y;\r\n}");
}

/// Test that writers on one pool reuse storage instead of allocating
#[test]
fn test_pool_reuse_across_writers() {
    let pool = Arc::new(CharPool::new());
    for i in 0..10 {
        let mut writer = CodeWriter::with_pool(Arc::clone(&pool), 0, options());
        writer.template("const int V{0} = {0};", &args![i]).unwrap();
    }
    let stats = pool.stats();
    assert_eq!(stats.rented, 10);
    assert_eq!(stats.allocated, 1);
    assert_eq!(stats.outstanding(), 0);
}

/// Test that a template error deep inside blocks propagates and unwinds indentation
#[test]
fn test_error_inside_nested_blocks() {
    let mut writer = CodeWriter::with_options(options());
    let result = writer.write("outer").try_bracket_block(|outer| {
        outer.try_bracket_block(|inner| {
            inner.template("value = {0", &args!["x"])?;
            Ok(())
        })?;
        Ok(())
    });

    assert_eq!(
        result.err(),
        Some(TemplateError::MissingHoleTerminator { line: 1, column: 9 })
    );
    assert_eq!(writer.indent_str(), "");
}

/// Test the serialized shape of a generated source
#[test]
fn test_source_serializes_for_sinks() {
    let mut writer = CodeWriter::with_options(options());
    writer.write("record Point(int X, int Y);");
    let json = serde_json::to_string(&writer.into_source("Point.g.cs")).unwrap();
    assert_eq!(
        json,
        r#"{"hint_name":"Point.g.cs","text":"record Point(int X, int Y);"}"#
    );
}
