use std::fs;

use flisp_gen::{
    DirectorySink, EchoSink, GenConfig, GenerateError, MemorySink, NewlineStyle, Sink, generate,
};
use flisp_parser::parse_meta;
use flisp_tree::Specification;
use pretty_assertions::assert_eq;

const META: &str = r#"
% Control unit configuration
<basic>
[RESET]
Q0(F1 F0 LDR)       % clear flags
Q1(OER LDTA)
Q2(MR G14 LDPC)

[FETCH]
Q3(MR CLRT LDI INCPC)

[00 : NOP]
I00( Q4(NF) )
"#;

fn rule() -> String {
    "-".repeat(80)
}

#[test]
fn test_basic_unit_file() {
    let spec = parse_meta(META).unwrap();
    let generation = generate(&spec, &GenConfig::default()).unwrap();
    let rule = rule();

    let expected = vec![
        "Konfigurationsfil: \"basic.hwflisp\"",
        "Genererad av FLISP-gen (c) Anton Mårtensson",
        "",
        &rule,
        "RESET",
        &rule,
        "# MergeState F1=\t(Q0)",
        "-",
        "# MergeState F0=\t(Q0)",
        "-",
        "# MergeState LDR=\t(Q0)",
        "-",
        "# MergeState OER=\t(Q1)",
        "-",
        "# MergeState LDTA=\t(Q1)",
        "-",
        "# MergeState MR=\t(Q2)",
        "-",
        "# MergeState G14=\t(Q2)",
        "-",
        "# MergeState LDPC=\t(Q2)",
        "",
        &rule,
        "FETCH",
        &rule,
        "# MergeState MR=\t(Q3)",
        "-",
        "# MergeState CLRT=\t(Q3)",
        "-",
        "# MergeState LDI=\t(Q3)",
        "-",
        "# MergeState INCPC=\t(Q3)",
        "",
        &rule,
        "00 : NOP",
        &rule,
        "# MergeState NF=\t(Q4*I00)",
    ];
    assert_eq!(generation.file_lines("basic.hwflisp").unwrap(), expected);
}

#[test]
fn test_leaf_group_leaf_separators() {
    let spec = parse_meta("<u>\n[S]\nA G(X) B").unwrap();
    let generation = generate(&spec, &GenConfig::default()).unwrap();
    let lines = generation.file_lines("u.hwflisp").unwrap();
    let body = &lines[6..];

    assert_eq!(
        body,
        [
            "# MergeState A=\t()",
            "-",
            "# MergeState X=\t(G)",
            "-",
            "# MergeState B=\t()",
        ]
    );
}

#[test]
fn test_sibling_order_follows_input() {
    let forward = parse_meta("<u>\n[S]\nQ0(A B) Q1(C)").unwrap();
    let backward = parse_meta("<u>\n[S]\nQ1(C) Q0(B A)").unwrap();
    let config = GenConfig::default();

    let directives = |spec: &Specification| {
        generate(spec, &config)
            .unwrap()
            .file_lines("u.hwflisp")
            .unwrap()
            .into_iter()
            .filter(|line| line.starts_with("# MergeState"))
            .map(str::to_string)
            .collect::<Vec<_>>()
    };

    let mut forward_lines = directives(&forward);
    let backward_lines = directives(&backward);
    assert_eq!(
        forward_lines,
        vec![
            "# MergeState A=\t(Q0)",
            "# MergeState B=\t(Q0)",
            "# MergeState C=\t(Q1)",
        ]
    );
    assert_ne!(forward_lines, backward_lines);

    forward_lines.sort();
    let mut backward_sorted = backward_lines;
    backward_sorted.sort();
    assert_eq!(forward_lines, backward_sorted);
}

#[test]
fn test_directory_sink_writes_every_file() {
    let dir = tempfile::tempdir().unwrap();
    let spec = parse_meta("<a>\n[S]\nx\n<b>\n[T]\ny").unwrap();
    let config = GenConfig::default().with_newline(NewlineStyle::Crlf);
    let generation = generate(&spec, &config).unwrap();

    let mut sink = DirectorySink::new(dir.path(), config.newline);
    generation.emit(&mut [&mut sink]).unwrap();

    let main = fs::read_to_string(dir.path().join("flisp.hwflisp")).unwrap();
    assert_eq!(
        main,
        "FLISP huvudkonfigurationsfil FLISP.HWFLISP\r\n\
         Konfigurering av fast styrenhet i FLISP\r\n\
         Genererad av FLISP-gen (c) Anton Maartensson\r\n\
         \r\n\
         # Load \"a.hwflisp\"\r\n\
         # Load \"b.hwflisp\"\r\n"
    );
    let unit = fs::read_to_string(dir.path().join("b.hwflisp")).unwrap();
    let tail = format!("T\r\n{}\r\n# MergeState y=\t()\r\n", rule());
    assert!(unit.ends_with(&tail));
    assert_eq!(sink.written().len(), 3);
}

#[test]
fn test_emit_to_several_sinks() {
    let spec = parse_meta("<a>\n[S]\nx").unwrap();
    let generation = generate(&spec, &GenConfig::default()).unwrap();

    let mut memory = MemorySink::new();
    let mut echo = EchoSink::new(Vec::new());
    {
        let mut sinks: [&mut dyn Sink; 2] = [&mut memory, &mut echo];
        generation.emit(&mut sinks).unwrap();
    }

    assert_eq!(memory.into_files(), generation.clone().into_files());
    let echoed = String::from_utf8(echo.into_inner()).unwrap();
    assert_eq!(echoed.lines().count(), generation.len());
    assert!(echoed.contains("flisp.hwflisp << # Load \"a.hwflisp\"\n"));
    assert!(echoed.contains("a.hwflisp << # MergeState x=\t()\n"));
}

#[test]
fn test_unit_named_flisp_keeps_main_file_intact() {
    let spec = parse_meta("<flisp>\n[S]\nx\n").unwrap();

    assert_eq!(
        generate(&spec, &GenConfig::default()),
        Err(GenerateError::MainFileCollision {
            unit: "flisp".to_string(),
            file_name: "flisp.hwflisp".to_string(),
        })
    );

    let config = GenConfig::new().with_main_name("main");
    let files = generate(&spec, &config).unwrap().into_files();
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["main.hwflisp", "flisp.hwflisp"]);
}

#[test]
fn test_unit_path_stays_inside_out_dir() {
    let spec = parse_meta("<../escape>\n[S]\nx\n").unwrap();

    assert!(matches!(
        generate(&spec, &GenConfig::default()),
        Err(GenerateError::InvalidName { name }) if name == "../escape"
    ));
}
