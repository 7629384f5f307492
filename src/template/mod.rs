mod renderer;
mod values;

pub use renderer::{render, TemplateValues};
pub use values::build_values;

/// Built-in summary template, editable through `rotacalc template`.
pub const DEFAULT_TEMPLATE: &str = "\u{1F4CB} *Resumo do Acionamento* \u{1F4CB}

*Dados Informados:*
- Contato com a base falo com: XXXX
- Prévia necessária: XXX Min
- Rota 3: XXXX | {{r3}} KM
{{#if r4}}- Rota 4: XXXX | {{r4}} KM{{/if}}
{{#if cobertura}}- Cobertura do Beneficiário: {{cobertura}} KM{{/if}}

*Resultados:*
{{#if deslocamento}}- Deslocamento (Prestador): {{deslocamento}} KM{{/if}}
- KM Cobertura: {{excedente_r3}} KM
{{#if excedente_cliente}}- *Excedente Beneficiário: {{excedente_cliente}} KM*{{/if}}

{{#if total_cliente}}
*Detalhamento (Beneficiário):*
{{#if excedente_cliente}}- Valor por KM: R$ {{valor_km}}{{/if}}
{{#if pedagio}}- Pedágio: R$ {{pedagio}}{{/if}}

\u{1F4B5} *TOTAL BENEFICIÁRIO: {{total_cliente}}*
O beneficiário está ciente de que deverá realizar o pagamento diretamente ao prestador, no valor de {{total_cliente}} no momento da retirada do veículo.
{{/if}}

{{#if custos_internos}}
\u{1F6E0} *Custos Internos:*
{{custos_internos}}
{{/if}}";
