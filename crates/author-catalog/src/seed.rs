//! Sample data for the demo binary and the integration tests.

use crate::model::AuthorCreate;

/// Eleven authors without books.
pub fn sample_authors() -> Vec<AuthorCreate> {
    [
        ("Daniel", "Penelva", "daniel.penelva@gmail.com", 37),
        ("João", "Silva", "joao.silva@gmail.com", 25),
        ("Maria", "Pereira", "maria.pereira@gmail.com", 33),
        ("Maria", "Nunes", "maria.nunes@gmail.com", 25),
        ("Carlos", "Silva", "carlos@empresa.com", 32),
        ("João", "Lima", "joao.lima@gmail.com", 41),
        ("Maria", "Moraes", "maria.moraes@gmail.com", 34),
        ("Daniel", "Oliveira", "daniel.oliveira@gmail.com", 35),
        ("Bolsonaro", "Mito", "bolsonaro@gmail.com", 60),
        ("Lula", "Ladrão", "lula.ladrao@gmail.com", 70),
        ("Danilo", "Marques", "danilo@gmail.com", 50),
    ]
    .into_iter()
    .map(|(first, last, email, age)| AuthorCreate::new(first, last, email, age))
    .collect()
}

/// Two authors with books, for the join queries.
pub fn authors_with_books() -> Vec<AuthorCreate> {
    vec![
        AuthorCreate::new("Caio", "Roberto", "caio@gmail.com", 36)
            .with_book("Java Básico")
            .with_book("Spring Boot Avançado"),
        AuthorCreate::new("Ana", "Clara", "ana@gmail", 40).with_book("Clean Code"),
    ]
}
