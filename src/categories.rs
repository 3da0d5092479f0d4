//! Static category configuration.
//!
//! Each category is a fixed list of question-column labels, copied verbatim
//! from the evaluation form (including trailing whitespace the form produces
//! in some headers). A category must tolerate any of its columns being
//! absent from a given sheet snapshot.

use crate::sheets::SheetKind;

/// A named group of question columns reported together.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const PERSONAL_ASPECTS: Category = Category {
    name: "Personal Aspects",
    columns: &[
        "Aparência (Uniforme limpo, asseado, faz uso de touca etc.)?",
        "Assiduidade (Comparece ao trabalho sem faltas)?",
        "Pontualidade (Comparece no trabalho no horário estipulado e cumpre carga pré-definida)?",
        "Faz uso correto dos EPI’s disponibilizados?",
    ],
};

pub const DEVELOPMENT: Category = Category {
    name: "Development",
    columns: &[
        "Relacionamento com Colegas (habilidade no trato com os colegas, influenciando positivamente e obtendo aceitação pessoal) ",
        "Relacionamento com a Liderança (habilidade para se comunicar com a chefia de maneira adequada) ",
        "Comunicação (capacidade para receber e emitir informações corretamente com os colegas e público em geral) ",
        "Demonstra interesse em aprender novas habilidades e conhecimentos? ",
        "Demonstra adequação à cultura organizacional da Papello? ",
    ],
};

pub const PROFESSIONAL_PERFORMANCE: Category = Category {
    name: "Professional Performance",
    columns: &[
        "Produtividade (ritmo de trabalho, aliado ao rendimento e qualidade com que o colaborador desenvolve as tarefas)",
        "\nQualidade do Trabalho (grau de perfeição, correção do trabalho e eficiência do trabalho executado) ",
        "Conhecimento do Trabalho (habilidade para reter /assimilar informações recebidas, usá-las e ensiná-las corretamente)",
        "Iniciativa (habilidade em agir/executar as tarefas e solucionar problemas sem necessidade de supervisão constante)",
        "Solução de Problemas (capacidade para buscar e dar soluções aos problemas rotineiros das atividades de trabalho)",
        "Atende às competências técnicas para o cargo (habilidade do colaborador na execução das atividades inerentes ao cargo)",
        "Tem domínio das ferramentas necessárias para a realização do trabalho?",
        "Garante que os procedimentos do processo estejam sendo cumpridos? ",
        "Busca exercer as diretrizes organizacionais da empresa (missão, visão, valores, política) ",
    ],
};

pub const ORGANIZATIONAL_CLIMATE: Category = Category {
    name: "Organizational Climate",
    columns: &[
        "Treinamento para desempenhar as suas atividades (em sala ou no local de trabalho)",
        "Conhecimento e habilidade para execução das tarefas",
        "Possibilidade de crescimento dentro da empresa",
        "Satisfação pelas atividades realizadas",
        "Reconhecimento pelo seu trabalho realizado",
        "Máquinas, ferramentas e instalações para desempenhar suas funções",
        "Organização e limpeza do seu local de trabalho",
        "Refeitório (qualidade da refeição, instalações, organização e limpeza)",
        "Banheiros (instalações, organização e limpeza)",
        "Vestiários (instalações, organização, limpeza)",
        "Segurança do seu local de trabalho",
        "Relacionamento entre os colegas de trabalho",
        "Relacionamento com as lideranças",
        "Comunicação entre as áreas",
        "Comunicação da empresa para os colaboradores",
        "Comunicação dos colaboradores para a empresa",
        "Liberdade para manifestar opiniões e propor sugestões",
        "O quanto você se sente realizado(a) profissionalmente?  ",
    ],
};

/// Categories reported for a given sheet.
///
/// The three evaluation sheets share the same three categories; the climate
/// survey has its own single category.
pub fn categories_for(kind: SheetKind) -> &'static [Category] {
    match kind {
        SheetKind::Climate => &[ORGANIZATIONAL_CLIMATE],
        _ => &[PERSONAL_ASPECTS, DEVELOPMENT, PROFESSIONAL_PERFORMANCE],
    }
}
