//! Canned [`ListConfig`]s for the stock admin entities, plus the generic
//! constructors they are built from.

use crate::filter::SortColumn;

use super::config::{FilterFieldConfig, FilterOperator, ListConfig};

/// Search-only entity: free text over the given fields, estado tabs.
pub fn basic_search(
    search_fields: impl IntoIterator<Item = impl Into<String>>,
    default_sort: Vec<SortColumn>,
) -> ListConfig {
    ListConfig::new(search_fields, default_sort).with_estado_field("estado")
}

/// Entity filtered by a `tipo` multi-select on top of the search box.
pub fn with_type_filter(
    search_fields: impl IntoIterator<Item = impl Into<String>>,
    type_field: impl Into<String>,
    default_sort: Vec<SortColumn>,
) -> ListConfig {
    basic_search(search_fields, default_sort)
        .with_filter("tipo", FilterFieldConfig::new(type_field, FilterOperator::In))
}

/// Entity filtered by a `categoria` multi-select.
pub fn with_category_filter(
    search_fields: impl IntoIterator<Item = impl Into<String>>,
    category_field: impl Into<String>,
    default_sort: Vec<SortColumn>,
) -> ListConfig {
    basic_search(search_fields, default_sort)
        .with_filter("categoria", FilterFieldConfig::new(category_field, FilterOperator::In))
}

pub fn usuario() -> ListConfig {
    with_type_filter(
        ["nombres", "apellido_paterno", "apellido_materno", "email", "dni"],
        "tipo",
        vec![SortColumn::asc("nombres")],
    )
}

pub fn rol() -> ListConfig {
    with_category_filter(["nombre", "descripcion"], "permisos", vec![SortColumn::asc("nombre")])
}

pub fn tipo_documento() -> ListConfig {
    with_category_filter(
        ["nombre", "descripcion", "codigo"],
        "categoria",
        vec![SortColumn::asc("nombre")],
    )
}

pub fn permiso() -> ListConfig {
    basic_search(["nombre", "descripcion", "modulo"], vec![SortColumn::asc("nombre")])
        .with_page_size(15)
}

pub fn modulo() -> ListConfig {
    basic_search(["nombre", "descripcion"], vec![SortColumn::asc("nombre")]).with_page_size(20)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usuario_preset_wires_the_tipo_filter() {
        let config = usuario();
        assert_eq!(config.search_fields.len(), 5);
        assert_eq!(config.estado_field.as_deref(), Some("estado"));
        let tipo = config.additional_filters.get("tipo").unwrap();
        assert_eq!(tipo.operator, FilterOperator::In);
        assert_eq!(config.default_page_size, 10);
    }
}
