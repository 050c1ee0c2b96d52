//! Toolchain benchmarks
//!
//! Measures the hot paths of both pipelines:
//! - mnemonic lookups (PHF maps)
//! - assembly parsing and the full two-pass pipeline
//! - symbol table operations (FxHashMap)
//! - VM command translation throughput
//!
//! Run with:
//! ```bash
//! cargo bench
//! cargo bench --bench assembler_bench -- --save-baseline master
//! ```

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hack_toolchain::asm::{assemble, code, Parser, SymbolTable};
use hack_toolchain::vm;

fn bench_code_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("code_lookups");
    group.throughput(Throughput::Elements(4));

    group.bench_function("dest_lookup_hot", |b| {
        b.iter(|| {
            black_box(code::dest("AMD"));
            black_box(code::dest("D"));
            black_box(code::dest("M"));
            black_box(code::dest(""));
        });
    });

    group.bench_function("comp_lookup_hot", |b| {
        b.iter(|| {
            black_box(code::comp("D+1"));
            black_box(code::comp("D&M"));
            black_box(code::comp("M-D"));
            black_box(code::comp("0"));
        });
    });

    group.bench_function("jump_lookup_hot", |b| {
        b.iter(|| {
            black_box(code::jump("JMP"));
            black_box(code::jump("JEQ"));
            black_box(code::jump(""));
        });
    });

    group.bench_function("encode_a_instruction", |b| {
        b.iter(|| black_box(code::encode_a_instruction(16384)));
    });

    group.finish();
}

fn bench_symbol_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("symbol_table");

    group.bench_function("lookup_predefined_hot", |b| {
        let table = SymbolTable::new();
        b.iter(|| {
            black_box(table.get_address("SP"));
            black_box(table.get_address("R15"));
            black_box(table.get_address("SCREEN"));
        });
    });

    group.bench_function("get_or_insert_existing", |b| {
        let mut table = SymbolTable::new();
        table.add_entry("LOOP", 100);
        let mut ram_address = 16;
        b.iter(|| {
            black_box(table.get_or_insert("LOOP", &mut ram_address));
        });
    });

    group.bench_function("get_or_insert_new", |b| {
        let mut counter = 0u32;
        b.iter(|| {
            let mut table = SymbolTable::new();
            let mut ram_address = 16;
            black_box(table.get_or_insert(&format!("VAR{counter}"), &mut ram_address));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let lines_mixed: Vec<String> = [
        "@100", "D=A", "(LOOP)", "D=D-1", "@LOOP", "D;JGT", "MD=M-1;JEQ", "0;JMP",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect();

    group.throughput(Throughput::Elements(lines_mixed.len() as u64));
    group.bench_function("parse_mixed_commands", |b| {
        b.iter(|| {
            let mut parser = Parser::from_lines(&lines_mixed);
            while parser.advance() {
                let kind = parser.command_type().unwrap();
                black_box(kind);
                black_box(parser.dest());
                black_box(parser.comp());
                black_box(parser.jump());
            }
        });
    });

    group.finish();
}

fn bench_full_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_assembly");

    let program: Vec<String> = [
        "@100",
        "D=A",
        "@i",
        "M=D",
        "(LOOP)",
        "@i",
        "D=M",
        "@END",
        "D;JEQ",
        "@i",
        "M=M-1",
        "@LOOP",
        "0;JMP",
        "(END)",
        "@END",
        "0;JMP",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect();

    group.throughput(Throughput::Elements(program.len() as u64));
    group.bench_function("pipeline_loop_program", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(program.len() * 17);
            assemble(black_box(&program), &mut out).unwrap();
            black_box(out);
        });
    });

    // Larger input to expose per-line overheads.
    let large: Vec<String> = program
        .iter()
        .cycle()
        .take(program.len() * 10)
        .cloned()
        .collect();
    group.throughput(Throughput::Elements(large.len() as u64));
    group.bench_function("pipeline_large_program", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(large.len() * 17);
            assemble(black_box(&large), &mut out).unwrap();
            black_box(out);
        });
    });

    group.finish();
}

fn bench_vm_translation(c: &mut Criterion) {
    let mut group = c.benchmark_group("vm_translation");

    let source = "\
function Main.fibonacci 0
push argument 0
push constant 2
lt
if-goto BASE
push argument 0
push constant 2
sub
call Main.fibonacci 1
push argument 0
push constant 1
sub
call Main.fibonacci 1
add
return
label BASE
push argument 0
return
";

    group.throughput(Throughput::Elements(source.lines().count() as u64));
    group.bench_function("translate_fibonacci", |b| {
        b.iter(|| {
            let mut parser = vm::Parser::new(Cursor::new(source)).unwrap();
            let mut writer = vm::CodeWriter::new(Vec::with_capacity(4096));
            writer.set_file_name("Main");
            vm::translator::translate_commands(&mut parser, &mut writer).unwrap();
            black_box(writer.into_inner());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_code_lookups,
    bench_symbol_table,
    bench_parser,
    bench_full_assembly,
    bench_vm_translation,
);

criterion_main!(benches);
