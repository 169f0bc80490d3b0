use criterion::{criterion_group, criterion_main, Criterion};
use showreel::presenter::ContentItem;
use showreel::{CardConfig, MediaEvent, PlayOutcome, Section, SectionLayout, SimulatedMedia, Viewport};

// Run with:
//    cargo bench --bench controller_bench

fn items(n: usize) -> Vec<ContentItem> {
    (0..n)
        .map(|i| ContentItem {
            title: format!("Project {}", i),
            description: String::new(),
            media_source: if i % 5 == 0 { None } else { Some(format!("/videos/{}.mp4", i)) },
        })
        .collect()
}

/// Bench: scrolling a long portfolio section top to bottom
fn bench_scroll_section(c: &mut Criterion) {
    let items = items(200);
    c.bench_function("scroll_section_200_cards", |b| {
        b.iter(|| {
            let mut section: Section<SimulatedMedia> = Section::layout(
                &items,
                Viewport::default(),
                SectionLayout::default(),
                CardConfig::default(),
                |_, _| SimulatedMedia::new(),
            )
            .unwrap();
            let mut y = 0.0;
            while y < section.document_height() {
                section.scroll_to(y);
                y += 120.0;
            }
        })
    });
}

/// Bench: play/settle/pause cycles on one card
fn bench_toggle_cycle(c: &mut Criterion) {
    let items = items(2);
    let mut section: Section<SimulatedMedia> = Section::layout(
        &items,
        Viewport::default(),
        SectionLayout::default(),
        CardConfig::default(),
        |_, _| SimulatedMedia::new(),
    )
    .unwrap();
    section.scroll_to(0.0);
    section.media_event(1, MediaEvent::CanPlay).unwrap();

    c.bench_function("toggle_cycle", |b| {
        b.iter(|| {
            let ticket = section
                .card(1)
                .unwrap()
                .controller()
                .and_then(|ctrl| ctrl.pending_ticket());
            if let Some(t) = ticket {
                section.settle_play(1, t, PlayOutcome::Started).unwrap();
            }
            section.click(1, &showreel::ClickTarget::Surface).unwrap();
        })
    });
}

criterion_group!(benches, bench_scroll_section, bench_toggle_cycle);
criterion_main!(benches);
