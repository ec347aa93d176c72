use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::DbPool,
    domain::{
        category::Category,
        customer::{Customer, NewCustomer, UpdateCustomer},
    },
    repository::{
        CustomerListQuery, CustomerOrder, CustomerReader, CustomerWriter, SortDirection,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::customers,
};

/// Diesel implementation of [`CustomerReader`] and [`CustomerWriter`].
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type BoxedCustomersQuery<'a> = customers::BoxedQuery<'a, Sqlite>;

/// Applies the filter criteria shared by the page query and the count query.
///
/// SQLite `LIKE` is case-insensitive for ASCII, which covers the
/// case-insensitive name match.
fn apply_filters<'a>(
    query: &CustomerListQuery,
    mut stmt: BoxedCustomersQuery<'a>,
) -> BoxedCustomersQuery<'a> {
    if let Some(name) = &query.name {
        let pattern = format!("%{name}%");
        stmt = stmt.filter(
            customers::first_name
                .like(pattern.clone())
                .or(customers::last_name.like(pattern)),
        );
    }
    if let Some(category) = query.category {
        stmt = stmt.filter(customers::category.eq(category.as_str()));
    }
    stmt
}

fn apply_order<'a>(
    query: &CustomerListQuery,
    stmt: BoxedCustomersQuery<'a>,
) -> BoxedCustomersQuery<'a> {
    match (query.order, query.direction) {
        (CustomerOrder::Id, SortDirection::Asc) => stmt.order(customers::id.asc()),
        (CustomerOrder::Id, SortDirection::Desc) => stmt.order(customers::id.desc()),
        (CustomerOrder::FirstName, SortDirection::Asc) => stmt.order(customers::first_name.asc()),
        (CustomerOrder::FirstName, SortDirection::Desc) => stmt.order(customers::first_name.desc()),
        (CustomerOrder::LastName, SortDirection::Asc) => stmt.order(customers::last_name.asc()),
        (CustomerOrder::LastName, SortDirection::Desc) => stmt.order(customers::last_name.desc()),
        (CustomerOrder::Email, SortDirection::Asc) => stmt.order(customers::email.asc()),
        (CustomerOrder::Email, SortDirection::Desc) => stmt.order(customers::email.desc()),
        (CustomerOrder::Category, SortDirection::Asc) => stmt.order(customers::category.asc()),
        (CustomerOrder::Category, SortDirection::Desc) => stmt.order(customers::category.desc()),
    }
}

impl CustomerReader for DieselRepository {
    fn get_customer_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>> {
        use crate::models::customer::Customer as DbCustomer;

        let mut conn = self.pool.get()?;
        // The email column is COLLATE NOCASE, so the comparison is
        // case-insensitive at the storage level.
        let customer = customers::table
            .filter(customers::email.eq(email))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        customer.map(TryInto::try_into).transpose().map_err(Into::into)
    }

    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)> {
        use crate::models::customer::Customer as DbCustomer;

        let mut conn = self.pool.get()?;

        let total: i64 = apply_filters(&query, customers::table.into_boxed())
            .count()
            .get_result(&mut conn)?;

        let mut stmt = apply_order(&query, apply_filters(&query, customers::table.into_boxed()));
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            stmt = stmt.limit(per_page).offset((page - 1) * per_page);
        }

        let items = stmt
            .load::<DbCustomer>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Customer>, _>>()?;

        Ok((total as usize, items))
    }

    fn count_customers(&self) -> RepositoryResult<i64> {
        let mut conn = self.pool.get()?;
        Ok(customers::table.count().get_result(&mut conn)?)
    }

    fn count_by_category(&self) -> RepositoryResult<Vec<(Category, i64)>> {
        let mut conn = self.pool.get()?;
        let rows = customers::table
            .group_by(customers::category)
            .select((customers::category, diesel::dsl::count_star()))
            .load::<(String, i64)>(&mut conn)?;

        // A stored category that no longer parses surfaces like every other
        // table/enum divergence in this adapter.
        rows.into_iter()
            .map(|(category, count)| Ok((category.parse::<Category>()?, count)))
            .collect()
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        use crate::models::customer::{Customer as DbCustomer, NewCustomer as DbNewCustomer};

        let mut conn = self.pool.get()?;
        let insertable: DbNewCustomer = new_customer.into();
        let inserted = diesel::insert_into(customers::table)
            .values(&insertable)
            .get_result::<DbCustomer>(&mut conn)?;

        inserted.try_into().map_err(Into::into)
    }

    fn update_customer(
        &self,
        customer_id: i32,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer> {
        use crate::models::customer::{Customer as DbCustomer, UpdateCustomer as DbUpdateCustomer};

        let mut conn = self.pool.get()?;
        let changeset: DbUpdateCustomer = updates.into();

        let updated = diesel::update(customers::table.find(customer_id))
            .set(&changeset)
            .get_result::<DbCustomer>(&mut conn)?;

        updated.try_into().map_err(Into::into)
    }

    fn delete_customer(&self, customer_id: i32) -> RepositoryResult<()> {
        let mut conn = self.pool.get()?;

        let affected = diesel::delete(customers::table.find(customer_id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
