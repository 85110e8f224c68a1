// ============================================================================
// Invoicing Infrastructure - In-Memory Store
// File: crates/invoicing-infrastructure/src/memory/store.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, error};
use uuid::Uuid;

use invoicing_core::domain::{Customer, Invoice, User};
use invoicing_core::error::DomainError;
use invoicing_core::repositories::{CustomerRepository, InvoiceRepository, UserRepository};
use invoicing_shared::Pagination;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    customers: HashMap<Uuid, Customer>,
    invoices: HashMap<Uuid, Invoice>,
}

impl Tables {
    /// Stored user with `customer_ids` derived from the customers table.
    fn load_user(&self, user: &User) -> User {
        let mut owned: Vec<&Customer> = self
            .customers
            .values()
            .filter(|c| c.is_owned_by(&user.id))
            .collect();
        owned.sort_by_key(|c| c.created_at);

        let mut user = user.clone();
        user.customer_ids = owned.into_iter().map(|c| c.id).collect();
        user
    }

    fn email_taken(&self, email: &str, except: &Uuid) -> bool {
        self.users
            .values()
            .any(|u| u.id != *except && u.email.eq_ignore_ascii_case(email))
    }

    fn owner_of(&self, invoice: &Invoice) -> Option<Uuid> {
        self.customers.get(&invoice.customer_id).and_then(|c| c.user_id)
    }

    fn last_chrono_in_sequence(&self, customer_id: &Uuid) -> Option<i32> {
        let owner = self.customers.get(customer_id).and_then(|c| c.user_id);
        self.invoices
            .values()
            .filter(|i| match owner {
                Some(owner) => self.owner_of(i) == Some(owner),
                None => i.customer_id == *customer_id,
            })
            .map(|i| i.chrono)
            .max()
    }
}

fn page<T>(mut items: Vec<T>, pagination: Pagination) -> Vec<T> {
    let offset = pagination.offset() as usize;
    if offset >= items.len() {
        return Vec::new();
    }
    items.drain(..offset);
    items.truncate(pagination.limit() as usize);
    items
}

fn ensure_hashed(user: &User) -> Result<(), DomainError> {
    if user.password.is_hashed() {
        Ok(())
    } else {
        error!("Refusing to store a plaintext password for user {}", user.id);
        Err(DomainError::InternalError("password must be hashed before persistence".into()))
    }
}

/// Users, customers and invoices behind a single lock, so cascades and
/// uniqueness checks see a consistent view.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read();
        Ok(tables.users.get(id).map(|u| tables.load_user(u)))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read();
        Ok(tables
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .map(|u| tables.load_user(u)))
    }

    async fn list(&self, pagination: Pagination) -> Result<Vec<User>, DomainError> {
        let tables = self.tables.read();
        let mut users: Vec<User> = tables.users.values().map(|u| tables.load_user(u)).collect();
        users.sort_by_key(|u| u.created_at);
        Ok(page(users, pagination))
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        ensure_hashed(user)?;
        let mut tables = self.tables.write();
        if tables.email_taken(&user.email, &user.id) || tables.users.contains_key(&user.id) {
            return Err(DomainError::EmailAlreadyExists(user.email.clone()));
        }
        tables.users.insert(user.id, user.clone());
        debug!(user_id = %user.id, "User stored");
        Ok(tables.load_user(user))
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        ensure_hashed(user)?;
        let mut tables = self.tables.write();
        if !tables.users.contains_key(&user.id) {
            return Err(DomainError::UserNotFound(user.id));
        }
        if tables.email_taken(&user.email, &user.id) {
            return Err(DomainError::EmailAlreadyExists(user.email.clone()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(tables.load_user(user))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let mut guard = self.tables.write();
        let tables = &mut *guard;
        let stored = tables.users.remove(id).ok_or(DomainError::UserNotFound(*id))?;
        let mut user = tables.load_user(&stored);
        for customer in tables.customers.values_mut() {
            user.remove_customer(customer);
        }
        debug!(user_id = %id, "User removed, customers detached");
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Customer>, DomainError> {
        Ok(self.tables.read().customers.get(id).cloned())
    }

    async fn list_by_user(&self, user_id: &Uuid, pagination: Pagination) -> Result<Vec<Customer>, DomainError> {
        let tables = self.tables.read();
        let mut customers: Vec<Customer> = tables
            .customers
            .values()
            .filter(|c| c.is_owned_by(user_id))
            .cloned()
            .collect();
        customers.sort_by_key(|c| c.created_at);
        Ok(page(customers, pagination))
    }

    async fn create(&self, customer: &Customer) -> Result<Customer, DomainError> {
        let mut tables = self.tables.write();
        if let Some(owner) = customer.user_id {
            if !tables.users.contains_key(&owner) {
                return Err(DomainError::UserNotFound(owner));
            }
        }
        tables.customers.insert(customer.id, customer.clone());
        Ok(customer.clone())
    }

    async fn update(&self, customer: &Customer) -> Result<Customer, DomainError> {
        let mut tables = self.tables.write();
        let stored = tables
            .customers
            .get_mut(&customer.id)
            .ok_or(DomainError::CustomerNotFound(customer.id))?;
        *stored = customer.clone();
        Ok(customer.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let mut tables = self.tables.write();
        tables.customers.remove(id).ok_or(DomainError::CustomerNotFound(*id))?;
        tables.invoices.retain(|_, invoice| invoice.customer_id != *id);
        Ok(())
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Invoice>, DomainError> {
        Ok(self.tables.read().invoices.get(id).cloned())
    }

    async fn list_by_user(&self, user_id: &Uuid, pagination: Pagination) -> Result<Vec<Invoice>, DomainError> {
        let tables = self.tables.read();
        let mut invoices: Vec<Invoice> = tables
            .invoices
            .values()
            .filter(|i| tables.owner_of(i) == Some(*user_id))
            .cloned()
            .collect();
        invoices.sort_by_key(|i| i.chrono);
        Ok(page(invoices, pagination))
    }

    async fn list_by_customer(&self, customer_id: &Uuid) -> Result<Vec<Invoice>, DomainError> {
        let tables = self.tables.read();
        let mut invoices: Vec<Invoice> = tables
            .invoices
            .values()
            .filter(|i| i.customer_id == *customer_id)
            .cloned()
            .collect();
        invoices.sort_by_key(|i| i.chrono);
        Ok(invoices)
    }

    async fn last_chrono_in_sequence(&self, customer_id: &Uuid) -> Result<Option<i32>, DomainError> {
        Ok(self.tables.read().last_chrono_in_sequence(customer_id))
    }

    async fn create(&self, invoice: &Invoice) -> Result<Invoice, DomainError> {
        let mut tables = self.tables.write();
        if !tables.customers.contains_key(&invoice.customer_id) {
            return Err(DomainError::CustomerNotFound(invoice.customer_id));
        }
        let mut stored = invoice.clone();
        stored.chrono = tables.last_chrono_in_sequence(&invoice.customer_id).unwrap_or(0) + 1;
        if stored.chrono != invoice.chrono {
            debug!(invoice_id = %invoice.id, expected = invoice.chrono, chrono = stored.chrono, "Invoice renumbered on insert");
        }
        tables.invoices.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, invoice: &Invoice) -> Result<Invoice, DomainError> {
        let mut tables = self.tables.write();
        let stored = tables
            .invoices
            .get_mut(&invoice.id)
            .ok_or(DomainError::InvoiceNotFound(invoice.id))?;
        *stored = invoice.clone();
        Ok(invoice.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.tables
            .write()
            .invoices
            .remove(id)
            .map(|_| ())
            .ok_or(DomainError::InvoiceNotFound(*id))
    }
}
