//! The `quizreport init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_once("quizreport.toml", SAMPLE_CONFIG)?;
    write_once("sample-results.json", SAMPLE_RESULTS)?;

    println!("\nNext steps:");
    println!("  1. Edit quizreport.toml to change colors, sizes or labels");
    println!("  2. Run: quizreport check --input sample-results.json");
    println!("  3. Run: quizreport render --input sample-results.json --format all");

    Ok(())
}

fn write_once(path: &str, content: &str) -> Result<()> {
    if std::path::Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, content)?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizreport configuration
# Every key is optional; missing keys keep their defaults.
# Lengths are millimetres on the page, font sizes are points.

[layout]
page_width = 210.0
page_height = 297.0
margin_left = 20.0
margin_right = 20.0
margin_top = 20.0
margin_bottom = 22.0
line_height = 6.0
footer_y = 290.0

[palette]
primary = [37, 99, 235]
error = [220, 38, 38]
success = [22, 163, 74]

[sizes]
title = 22.0
body = 11.0

[labels]
footer = "Generado automáticamente por quizreport"
"#;

const SAMPLE_RESULTS: &str = r#"{
  "student_name": "Ana García",
  "score": 1,
  "total_exercises": 3,
  "time_spent": "04:32",
  "exercises": [
    {
      "id": 1,
      "enunciado_incorrecto": "Estudió toda la noche, ______ aprobó el examen.",
      "conector_correcto": "por eso",
      "explicacion": "'Por eso' introduce una consecuencia de lo anterior.",
      "opciones": ["por eso", "sin embargo", "aunque"]
    },
    {
      "id": 2,
      "enunciado_incorrecto": "______ le gusta el mar, ______ prefiere la montaña.",
      "conector_correcto": "aunque - en el fondo",
      "explicacion": ""
    },
    {
      "id": 3,
      "enunciado_incorrecto": "Hacía frío ______ salimos a correr.",
      "conector_correcto": "y aun así"
    }
  ],
  "answers": [
    { "ejercicioId": 1, "respuestaSeleccionada": "sin embargo" },
    { "ejercicioId": 2, "respuestaSeleccionada": "porque" },
    { "ejercicioId": 3, "respuestaSeleccionada": "y aun así" }
  ]
}
"#;
