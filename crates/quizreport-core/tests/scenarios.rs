//! End-to-end layout scenarios over the default configuration.

use quizreport_core::config::{Labels, ReportConfig};
use quizreport_core::flow::TextFlow;
use quizreport_core::measure::{HeuristicMeasurer, TextMeasurer};
use quizreport_core::mismatch::find_mismatches;
use quizreport_core::model::{
    Exercise, ExerciseId, FontWeight, ReportRequest, Rgb, StyledSpan, TextStyle, UserAnswer,
};
use quizreport_core::segment::PLACEHOLDER;
use quizreport_core::{Document, ReportComposer};

fn exercise(id: ExerciseId, template: &str, correct: &str) -> Exercise {
    Exercise {
        id,
        template: template.into(),
        correct_connector: correct.into(),
        explanation: None,
        options: vec![],
    }
}

fn answer(id: ExerciseId, selected: &str) -> UserAnswer {
    UserAnswer {
        exercise_id: id,
        selected_connector: selected.into(),
    }
}

fn request(exercises: Vec<Exercise>, answers: Vec<UserAnswer>) -> ReportRequest {
    let correct = answers
        .iter()
        .filter(|a| {
            exercises
                .iter()
                .any(|e| e.id == a.exercise_id && e.correct_connector == a.selected_connector)
        })
        .count() as u32;
    ReportRequest {
        student_name: "Mateo Ruiz".into(),
        score: correct,
        total_exercises: exercises.len() as u32,
        time_spent: "07:45".into(),
        exercises,
        answers,
    }
}

fn compose(req: &ReportRequest) -> Document {
    ReportComposer::new(ReportConfig::default())
        .unwrap()
        .compose(req)
        .unwrap()
}

#[test]
fn scenario_a_single_mismatch_highlights_both_connectors() {
    let req = request(
        vec![exercise(1, "El carro es rojo __ es rápido.", "y")],
        vec![answer(1, "pero")],
    );
    assert_eq!(find_mismatches(&req.exercises, &req.answers).len(), 1);

    let doc = compose(&req);
    let config = ReportConfig::default();
    let runs: Vec<_> = doc.pages.iter().flat_map(|p| p.texts()).collect();

    let wrong = runs.iter().find(|t| t.text == " PERO ").unwrap();
    assert_eq!(wrong.style.color, config.palette.error);
    let right = runs.iter().find(|t| t.text == " Y ").unwrap();
    assert_eq!(right.style.color, config.palette.success);

    let lines = doc.text_lines();
    assert!(lines.contains(&"Análisis de Errores (1):".to_string()));
    assert!(lines.contains(&"Ejercicio 1:".to_string()));
    assert!(lines.iter().any(|l| l.starts_with("El carro es rojo") && l.contains("PERO")));
    assert!(lines.iter().any(|l| l.starts_with("El carro es rojo") && l.contains(" Y ")));
}

#[test]
fn scenario_b_all_correct_gives_header_and_congratulation_only() {
    let req = request(
        vec![exercise(1, "Comí __ bebí.", "y"), exercise(2, "Corre __ se cansa.", "pero")],
        vec![answer(1, "y"), answer(2, "pero")],
    );
    let doc = compose(&req);
    let labels = Labels::default();

    assert_eq!(doc.page_count(), 1);
    assert_eq!(
        doc.text_lines(),
        vec![
            labels.title.clone(),
            "Estudiante: Mateo Ruiz".to_string(),
            "Puntuación: 2 / 2".to_string(),
            "Tiempo invertido: 07:45".to_string(),
            labels.no_mistakes.clone(),
            labels.footer.clone(),
        ]
    );
    assert_eq!(doc.pages[0].rules().count(), 1);
}

#[test]
fn scenario_c_missing_connector_part_renders_placeholder() {
    let req = request(
        vec![exercise(
            1,
            "__ quiere viajar, __ no tiene dinero.",
            "por un lado - por otro lado",
        )],
        vec![answer(1, "por un lado")],
    );
    let doc = compose(&req);
    let config = ReportConfig::default();
    let runs: Vec<_> = doc.pages[0].texts().collect();

    let placeholder = runs
        .iter()
        .find(|t| t.text.trim() == PLACEHOLDER)
        .expect("placeholder slot rendered");
    assert_eq!(placeholder.style.color, config.palette.error);

    let correct_second = runs
        .iter()
        .find(|t| t.text.trim() == "POR OTRO LADO")
        .expect("second correct part rendered");
    assert_eq!(correct_second.style.weight, FontWeight::Bold);
}

#[test]
fn scenario_d_exercise_block_moves_whole_to_next_page() {
    let exercises: Vec<Exercise> = (1..=4)
        .map(|id| exercise(id, "Vino tarde __ perdió el tren.", "por eso"))
        .collect();
    let answers: Vec<UserAnswer> = (1..=4).map(|id| answer(id, "aunque")).collect();
    let doc = compose(&request(exercises, answers));

    assert_eq!(doc.page_count(), 2);
    let first = doc.pages[0].text_lines();
    let second = doc.pages[1].text_lines();
    assert!(first.contains(&"Ejercicio 3:".to_string()));
    assert!(!first.contains(&"Ejercicio 4:".to_string()));
    assert_eq!(second[0], "Ejercicio 4:");
    assert_eq!(second[1], "Tu respuesta (incorrecta):");

    let top = ReportConfig::default().layout.margin_top;
    assert_eq!(doc.pages[1].lines()[0][0].y, top);
}

#[test]
fn every_title_stays_with_its_sentences() {
    let exercises: Vec<Exercise> = (1..=15)
        .map(|id| {
            let mut e = exercise(
                id,
                "Aunque el examen era difícil y largo, __ los alumnos terminaron a tiempo y __ salieron contentos del aula.",
                "todos - además",
            );
            e.explanation = Some("Con 'aunque' se introduce una concesión que no impide la acción principal de la oración.".into());
            e
        })
        .collect();
    let answers: Vec<UserAnswer> = (1..=15).map(|id| answer(id, "sin embargo - pero")).collect();
    let doc = compose(&request(exercises, answers));
    assert!(doc.page_count() >= 3);

    for page in &doc.pages {
        let lines = page.text_lines();
        for (i, line) in lines.iter().enumerate() {
            if line.starts_with("Ejercicio ") {
                assert_eq!(lines.get(i + 1).map(String::as_str), Some("Tu respuesta (incorrecta):"));
            }
        }
    }
}

#[test]
fn cursor_resets_and_baselines_increase_per_page() {
    let exercises: Vec<Exercise> = (1..=12)
        .map(|id| exercise(id, "Hacía sol, __ fuimos a la playa.", "así que"))
        .collect();
    let answers: Vec<UserAnswer> = (1..=12).map(|id| answer(id, "aunque")).collect();
    let doc = compose(&request(exercises, answers));
    let layout = ReportConfig::default().layout;

    for page in &doc.pages {
        let ys: Vec<f32> = page.lines().iter().map(|l| l[0].y).collect();
        assert_eq!(ys[0], layout.margin_top);
        assert!(ys.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn compose_is_idempotent() {
    let req = request(
        vec![
            exercise(1, "Estaba cansado, __ siguió estudiando.", "sin embargo"),
            exercise(2, "__ llueve, __ hace frío.", "no solo - sino que además"),
        ],
        vec![answer(2, "tanto - como"), answer(1, "por lo tanto")],
    );
    let first = compose(&req);
    let second = compose(&req);

    assert_eq!(first.page_count(), second.page_count());
    for (a, b) in first.pages.iter().zip(&second.pages) {
        assert_eq!(a.text_lines(), b.text_lines());
    }
    assert_eq!(first, second);
}

#[test]
fn unknown_exercise_answers_are_left_out() {
    let req = request(
        vec![exercise(1, "Vino __ se fue.", "y")],
        vec![answer(42, "o"), answer(1, "o")],
    );
    let doc = compose(&req);
    assert!(doc.text_lines().contains(&"Análisis de Errores (1):".to_string()));
    assert!(!doc.text_lines().contains(&"Ejercicio 2:".to_string()));
}

#[test]
fn wrapped_lines_stay_inside_the_column() {
    let layout = ReportConfig::default().layout;
    let measurer = HeuristicMeasurer;
    let mut flow = TextFlow::new(layout, Default::default(), &measurer);
    let body = TextStyle::new(11.0, Rgb(71, 85, 105), FontWeight::Normal);
    let slot = TextStyle::new(11.0, Rgb(22, 163, 74), FontWeight::Bold);
    let overlong = "Supercalifragilísticoespialidosamente".repeat(5);

    let text = format!(
        "La profesora explicó la lección con mucha paciencia y ejemplos claros {overlong} para que todos entendieran"
    );
    let spans = vec![
        StyledSpan::new(text, body),
        StyledSpan::new(" NO OBSTANTE ", slot),
        StyledSpan::new("algunos estudiantes siguieron con dudas sobre el uso de los conectores.", body),
    ];
    let lines = flow.write_inline(&spans);
    let doc = flow.finish();
    assert_eq!(doc.pages[0].lines().len(), lines);

    for line in doc.pages[0].lines() {
        let right_edge = line
            .iter()
            .map(|t| t.x + measurer.measure(t.text.trim_end(), &t.style))
            .fold(f32::MIN, f32::max);
        let words: usize = line.iter().map(|t| t.text.split_whitespace().count()).sum();
        assert!(
            right_edge <= layout.right_limit() + 1e-3 || words == 1,
            "line overflows with {words} words"
        );
    }
}
