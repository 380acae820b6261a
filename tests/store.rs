use std::collections::BTreeMap;

use chrono::{DateTime, Local, TimeZone};
use course_quiz::{QuizQuestion, ResultEntry, Store, load_json, parse, save_json};

const RAW: &str = "\
1. Quelle est la capitale de la France ?
a) Lyon
b) Paris
c) Marseille
d) Lille
Réponse correcte : b

2. Combien de côtés a un triangle ?
a) Deux
b) Trois
c) Quatre
Réponse correcte : b
";

fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 10, 18, h, m, s).unwrap()
}

fn entry(quiz: &str, responses: &[(usize, char)], score: usize) -> ResultEntry {
    ResultEntry {
        timestamp: "2026-10-18 12:00:00".to_string(),
        doc: Some("data/docs/cours_20261018_120000.pdf".to_string()),
        quiz: Some(quiz.to_string()),
        score,
        total: 2,
        responses: responses.iter().copied().collect::<BTreeMap<_, _>>(),
    }
}

#[test]
fn test_parsed_quiz_survives_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();

    let quiz = parse(RAW);
    assert_eq!(quiz.len(), 2);
    assert_eq!(quiz[1].question, "2. Combien de côtés a un triangle ?");

    let path = store.save_quiz(&quiz, at(12, 0, 0)).unwrap();
    assert!(path.starts_with(store.quizzes_dir()));
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "quiz_20261018_120000.json"
    );

    let loaded = store.load_quiz(&path).unwrap().unwrap();
    assert_eq!(loaded, quiz);
    let keys: Vec<char> = loaded[0].options.keys().collect();
    assert_eq!(keys, vec!['a', 'b', 'c', 'd']);
}

#[test]
fn test_quiz_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quiz.json");
    save_json(&path, &parse(RAW)).unwrap();

    let value: serde_json::Value = load_json(&path).unwrap().unwrap();
    let first = &value[0];
    assert_eq!(first["question"], "1. Quelle est la capitale de la France ?");
    assert_eq!(first["options"]["b"], "Paris");
    assert_eq!(first["correct"], "b");
}

#[test]
fn test_same_second_quizzes_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let quiz: Vec<QuizQuestion> = parse(RAW);

    let first = store.save_quiz(&quiz, at(9, 30, 0)).unwrap();
    let second = store.save_quiz(&quiz, at(9, 30, 0)).unwrap();
    assert_ne!(first, second);
    assert!(first.exists());
    assert!(second.exists());
}

#[test]
fn test_results_accumulate() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    assert!(store.load_results().unwrap().is_empty());

    store
        .append_result(entry("q1.json", &[(0, 'b'), (1, 'a')], 1))
        .unwrap();
    store.append_result(entry("q1.json", &[(0, 'b')], 1)).unwrap();

    let results = store.load_results().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].responses.get(&1), Some(&'a'));
    assert_eq!(results[1].responses.len(), 1);

    let raw: serde_json::Value = load_json(&store.results_path()).unwrap().unwrap();
    assert_eq!(raw[0]["reponses"]["0"], "b");
}
