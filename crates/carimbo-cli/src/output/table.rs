use carimbo_core::export::{yes_no, NOT_IDENTIFIED, NO_KEYWORDS};
use carimbo_core::screening::outcome::{BatchResult, DocumentResult};
use carimbo_core::screening::stats::BatchStatistics;

use super::InspectedName;

pub fn print_screening(batch: &BatchResult, statistics: &BatchStatistics) {
    for (i, (name, result)) in batch.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_document(name, result);
    }

    if batch.cancelled {
        println!("\n(run cancelled before all documents were processed)");
    }

    let s = &statistics.summary;
    println!("\n=== Resumo ===\n");
    println!("  Arquivos analisados:  {}", s.total);
    println!("  Nome encontrado:      {}", s.filename_found);
    println!("  Prancha encontrada:   {}", s.sheet_number_found);
    println!("  Arquivos assinados:   {}", s.marked_signed);
    println!("  Projeto encontrado:   {}", s.project_description_found);
    if s.failed > 0 {
        println!("  Falhas de leitura:    {}", s.failed);
    }

    println!("\n=== Engenheiros encontrados ===\n");
    if statistics.by_signatory.is_empty() {
        println!("  Nenhum engenheiro encontrado nos arquivos analisados");
    } else {
        for (engineer, count) in &statistics.by_signatory {
            println!("  {}: encontrado em {} arquivo(s)", engineer, count);
        }
    }

    println!("\n=== Projetos ===\n");
    if statistics.by_project.is_empty() {
        println!("  Nenhum projeto identificado nos arquivos analisados");
    } else {
        for (project, count) in &statistics.by_project {
            println!("  {}: {} arquivo(s)", project, count);
        }
    }
    println!();
}

fn print_document(name: &str, result: &DocumentResult) {
    println!("=== {} ===\n", name);

    if let Some(ref error) = result.processing_error {
        println!("  ERRO: {}\n", error);
    }

    println!(
        "  Prancha:         {}",
        result.sheet_number.as_deref().unwrap_or(NOT_IDENTIFIED)
    );
    println!(
        "  Projeto:         {} ({})",
        result.project_code.as_deref().unwrap_or(NOT_IDENTIFIED),
        result.project_description
    );
    if result.found_keywords.is_empty() {
        println!("  Palavras-chave:  {}", NO_KEYWORDS);
    } else {
        println!("  Palavras-chave:");
        for keyword in &result.found_keywords {
            println!("    {}", keyword);
        }
    }

    let checks = [
        ("Nome encontrado", result.filename_found_in_text),
        ("Prancha encontrada", result.sheet_number_found_in_text),
        ("Arquivo assinado", result.marked_signed_by_filename),
        ("Projeto encontrado", result.project_description_found_in_text),
    ];
    println!();
    for (label, value) in checks {
        println!("  {:<20} {}", label, yes_no(value));
    }
}

pub fn print_inspected(inspected: &[InspectedName]) {
    for (i, item) in inspected.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", item.name);
        println!("  Nome base:   {}", item.facts.base_name);
        println!(
            "  Prancha:     {}",
            item.facts.sheet_number.as_deref().unwrap_or(NOT_IDENTIFIED)
        );
        println!(
            "  Projeto:     {} ({})",
            item.facts.project_code.as_deref().unwrap_or(NOT_IDENTIFIED),
            item.project_description
        );
        println!("  Assinado:    {}", yes_no(item.facts.marked_signed));
    }
}
