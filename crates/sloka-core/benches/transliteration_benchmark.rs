use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sloka_core::{clean_iast, devanagari_to_phonetic, romanize, syllabify, VerseText};

const DEVANAGARI: &str = "धर्मक्षेत्रे कुरुक्षेत्रे समवेता युयुत्सवः। मामकाः पाण्डवाश्चैव किमकुर्वत सञ्जय॥";
const IAST: &str = "dharma-kṣetre kuru-kṣetre samavetā yuyutsavaḥ māmakāḥ pāṇḍavāś caiva kim akurvata sañjaya";
const ENGLISH: &str = "Dhritarashtra said: O Sanjaya, after my sons and the sons of Pandu assembled in the place of pilgrimage at Kurukshetra, desiring to fight, what did they do?";

fn bench_converters(c: &mut Criterion) {
    let mut group = c.benchmark_group("converters");

    for verses in [1usize, 10, 50] {
        let devanagari = vec![DEVANAGARI; verses].join(" ");
        let iast = vec![IAST; verses].join(" ");

        group.bench_with_input(
            BenchmarkId::new("devanagari_to_phonetic", verses),
            &devanagari,
            |b, text| b.iter(|| devanagari_to_phonetic(black_box(text))),
        );
        group.bench_with_input(BenchmarkId::new("clean_iast", verses), &iast, |b, text| {
            b.iter(|| clean_iast(black_box(text)));
        });
    }

    group.finish();
}

fn bench_syllabify(c: &mut Criterion) {
    let phonetic = devanagari_to_phonetic(DEVANAGARI);
    c.bench_function("syllabify", |b| b.iter(|| syllabify(black_box(&phonetic))));
    c.bench_function("romanize", |b| b.iter(|| romanize(black_box(DEVANAGARI))));
}

fn bench_session_preparation(c: &mut Criterion) {
    c.bench_function("verse_text_prepare", |b| {
        b.iter(|| VerseText::prepare(black_box(DEVANAGARI), black_box(IAST), black_box(ENGLISH)));
    });
}

criterion_group!(
    benches,
    bench_converters,
    bench_syllabify,
    bench_session_preparation
);
criterion_main!(benches);
