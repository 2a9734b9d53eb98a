pub mod criteria;
pub mod sort;
pub mod where_clause;

pub use criteria::{
    BoolCriterion, DateCriterion, EnumCriterion, FilterCriterion, NumberCriterion, StringCriterion,
};
pub use sort::{format_sort_param, parse_sort_param, SortColumn, SortDirection};
pub use where_clause::WhereExpression;
