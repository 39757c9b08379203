//! Benchmarks for tagged text buffer operations
//!
//! Run with: cargo bench --bench buffer

use scribe::model::{EditSession, Rgb, Tag, TextBuffer};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// Buffer with `lines` lines and a bold/color tag on every other line
fn tagged_buffer(lines: usize) -> TextBuffer {
    let mut buffer = TextBuffer::from_text(&"foo bar baz qux\n".repeat(lines));
    let red = Rgb::new(255, 0, 0);
    for line in (0..lines).step_by(2) {
        let start = buffer.line_start(line);
        buffer.add_tag(Tag::Bold, start, start + 3);
        buffer.add_tag(Tag::Color(red), start + 4, start + 7);
    }
    buffer
}

// ============================================================================
// Insert / delete with tag renumbering
// ============================================================================

#[divan::bench(args = [100, 1000, 10_000])]
fn insert_middle(bencher: divan::Bencher, lines: usize) {
    bencher
        .with_inputs(|| tagged_buffer(lines))
        .bench_local_values(|mut buffer| {
            let mid = buffer.len_chars() / 2;
            buffer.insert(mid, divan::black_box("inserted text\n"));
            buffer
        });
}

#[divan::bench(args = [100, 1000, 10_000])]
fn delete_middle(bencher: divan::Bencher, lines: usize) {
    bencher
        .with_inputs(|| tagged_buffer(lines))
        .bench_local_values(|mut buffer| {
            let start = buffer.len_chars() / 2;
            let removed = buffer.delete(start, start + 100);
            divan::black_box(removed.ok());
            buffer
        });
}

// ============================================================================
// Tag queries
// ============================================================================

#[divan::bench(args = [100, 1000, 10_000])]
fn tags_at_middle(bencher: divan::Bencher, lines: usize) {
    let buffer = tagged_buffer(lines);
    let mid = buffer.line_start(lines / 2);
    bencher.bench_local(|| buffer.tag_names_at(divan::black_box(mid)));
}

#[divan::bench(args = [100, 1000])]
fn toggle_bold_select_all(bencher: divan::Bencher, lines: usize) {
    bencher
        .with_inputs(|| {
            let mut session = EditSession::with_text(&"hello world\n".repeat(lines));
            session.select_all();
            session
        })
        .bench_local_values(|mut session| {
            session.toggle_bold();
            session
        });
}

// ============================================================================
// Typing with stamping
// ============================================================================

#[divan::bench(args = [10, 100])]
fn type_formatted_characters(count: usize) {
    let mut session = EditSession::new();
    session.toggle_bold();
    session.change_font_size(14);
    for _ in 0..count {
        let _ = session.type_character('a');
    }
    divan::black_box(session.buffer.tags().len());
}
