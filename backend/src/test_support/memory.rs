//! In-memory repositories mirroring the Diesel adapters' observable
//! behaviour: newest-first ordering, audit entries written with each book
//! mutation and unique email/mobile enforcement.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    AccountRepositoryError, AdminRepository, BookRepository, BookRepositoryError,
    OrderRepository, OrderRepositoryError, UserAccountRepository,
};
use crate::domain::{
    Admin, AdminAccount, AdminId, AuditEntry, Book, BookDraft, BookId, BookSearch, NewAuditEntry,
    NewBook, NewOrder, NewUser, Order, OrderId, OrderItem, OrderStatus, User, UserAccount,
    UserId,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct BookTables {
    /// Insertion order; listings reverse it.
    books: Vec<Book>,
    audit: Vec<AuditEntry>,
}

impl BookTables {
    fn append_audit(&mut self, entry: NewAuditEntry, clock: &dyn Clock) {
        let id = i64::try_from(self.audit.len()).unwrap_or(i64::MAX) + 1;
        self.audit.push(AuditEntry {
            id,
            book_id: entry.book_id,
            action_type: entry.action,
            admin_id: entry.admin_id,
            old_values: entry.old_values,
            new_values: entry.new_values,
            created_at: clock.utc(),
        });
    }

    fn newest_first(&self, keep: impl Fn(&Book) -> bool) -> Vec<Book> {
        self.books.iter().rev().filter(|b| keep(b)).cloned().collect()
    }
}

/// Book repository held in memory.
pub struct InMemoryBookRepository {
    tables: Mutex<BookTables>,
    clock: Arc<dyn Clock>,
}

impl InMemoryBookRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Mutex::new(BookTables::default()),
            clock,
        }
    }

    /// Every audit entry in insertion order.
    pub fn audit_log(&self) -> Vec<AuditEntry> {
        lock(&self.tables).audit.clone()
    }

    pub fn book_count(&self) -> usize {
        lock(&self.tables).books.len()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn apply_draft(book: &mut Book, draft: &BookDraft) {
    book.title.clone_from(&draft.title);
    book.author.clone_from(&draft.author);
    book.description.clone_from(&draft.description);
    book.category.clone_from(&draft.category);
    book.price = draft.price;
    book.stock = draft.stock;
    book.image_url.clone_from(&draft.image_url);
    book.featured = draft.featured;
    book.publisher_url.clone_from(&draft.publisher_url);
    book.book_type = draft.book_type;
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list_all(&self) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(lock(&self.tables).newest_first(|_| true))
    }

    async fn list_page(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Book>, i64), BookRepositoryError> {
        let all = lock(&self.tables).newest_first(|_| true);
        let total = i64::try_from(all.len()).unwrap_or(i64::MAX);
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(0);
        Ok((all.into_iter().skip(skip).take(take).collect(), total))
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookRepositoryError> {
        Ok(lock(&self.tables)
            .books
            .iter()
            .find(|book| book.id == *id)
            .cloned())
    }

    async fn search(&self, filter: &BookSearch) -> Result<Vec<Book>, BookRepositoryError> {
        let needle = filter.needle.as_deref().map(str::to_lowercase);
        Ok(lock(&self.tables).newest_first(|book| match needle.as_deref() {
            None => true,
            Some(needle) => {
                contains_ci(&book.title, needle)
                    || contains_ci(&book.author, needle)
                    || (filter.include_description && contains_ci(&book.description, needle))
            }
        }))
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(lock(&self.tables).newest_first(|book| book.category.as_deref() == Some(category)))
    }

    async fn list_featured(&self) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(lock(&self.tables).newest_first(|book| book.featured))
    }

    async fn create(&self, book: &NewBook) -> Result<Book, BookRepositoryError> {
        let now = self.clock.utc();
        let mut tables = lock(&self.tables);
        if tables.books.iter().any(|existing| existing.id == book.id) {
            return Err(BookRepositoryError::query("duplicate book id"));
        }
        let mut row = Book {
            id: book.id,
            title: String::new(),
            author: String::new(),
            description: String::new(),
            category: None,
            price: 0.0,
            stock: 0,
            image_url: None,
            featured: false,
            publisher_url: None,
            book_type: book.draft.book_type,
            view_count: 0,
            created_by: Some(book.created_by),
            updated_by: Some(book.created_by),
            created_at: now,
            updated_at: now,
        };
        apply_draft(&mut row, &book.draft);
        tables.books.push(row.clone());
        tables.append_audit(
            NewAuditEntry::created(book.id, book.created_by, &book.draft),
            self.clock.as_ref(),
        );
        Ok(row)
    }

    async fn update(
        &self,
        id: &BookId,
        draft: &BookDraft,
        admin_id: AdminId,
    ) -> Result<Option<Book>, BookRepositoryError> {
        let now = self.clock.utc();
        let mut tables = lock(&self.tables);
        let Some(book) = tables.books.iter_mut().find(|book| book.id == *id) else {
            return Ok(None);
        };
        let prior = book.clone();
        apply_draft(book, draft);
        book.updated_by = Some(admin_id);
        book.updated_at = now;
        let updated = book.clone();
        tables.append_audit(
            NewAuditEntry::updated(&prior, admin_id, draft),
            self.clock.as_ref(),
        );
        Ok(Some(updated))
    }

    async fn delete(&self, id: &BookId) -> Result<bool, BookRepositoryError> {
        let mut tables = lock(&self.tables);
        let before = tables.books.len();
        tables.books.retain(|book| book.id != *id);
        Ok(tables.books.len() < before)
    }

    async fn increment_view_count(&self, id: &BookId) -> Result<(), BookRepositoryError> {
        if let Some(book) = lock(&self.tables)
            .books
            .iter_mut()
            .find(|book| book.id == *id)
        {
            book.view_count += 1;
        }
        Ok(())
    }

    async fn audit_entries(&self, id: &BookId) -> Result<Vec<AuditEntry>, BookRepositoryError> {
        Ok(lock(&self.tables)
            .audit
            .iter()
            .rev()
            .filter(|entry| entry.book_id == *id)
            .cloned()
            .collect())
    }
}

/// Customer accounts held in memory.
#[derive(Default)]
pub struct InMemoryUserAccounts {
    accounts: Mutex<Vec<UserAccount>>,
}

impl InMemoryUserAccounts {
    pub fn len(&self) -> usize {
        lock(&self.accounts).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserAccountRepository for InMemoryUserAccounts {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, AccountRepositoryError> {
        Ok(lock(&self.accounts)
            .iter()
            .find(|account| account.user.email == email)
            .cloned())
    }

    async fn exists_with_email_or_mobile(
        &self,
        email: &str,
        mobile: &str,
    ) -> Result<bool, AccountRepositoryError> {
        Ok(lock(&self.accounts)
            .iter()
            .any(|account| account.user.email == email || account.user.mobile == mobile))
    }

    async fn insert(&self, user: &NewUser) -> Result<UserId, AccountRepositoryError> {
        let mut accounts = lock(&self.accounts);
        if accounts
            .iter()
            .any(|account| account.user.email == user.email || account.user.mobile == user.mobile)
        {
            return Err(AccountRepositoryError::duplicate(
                "duplicate key value violates unique constraint",
            ));
        }
        let id = UserId::new(i64::try_from(accounts.len()).unwrap_or(i64::MAX) + 1);
        accounts.push(UserAccount {
            user: User {
                id,
                name: user.name.clone(),
                email: user.email.clone(),
                mobile: user.mobile.clone(),
                state: user.state.clone(),
                city: user.city.clone(),
            },
            password_hash: user.password_hash.clone(),
        });
        Ok(id)
    }
}

/// Administrator accounts held in memory; seed them with [`Self::with_admin`].
#[derive(Default)]
pub struct InMemoryAdmins {
    accounts: Mutex<Vec<AdminAccount>>,
}

impl InMemoryAdmins {
    /// Add an administrator with an already-hashed password.
    #[must_use]
    pub fn with_admin(self, username: &str, password_hash: String) -> Self {
        {
            let mut accounts = lock(&self.accounts);
            let id = AdminId::new(i64::try_from(accounts.len()).unwrap_or(i64::MAX) + 1);
            accounts.push(AdminAccount {
                admin: Admin {
                    id,
                    username: username.to_owned(),
                },
                password_hash,
            });
        }
        self
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdmins {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, AccountRepositoryError> {
        Ok(lock(&self.accounts)
            .iter()
            .find(|account| account.admin.username == username)
            .cloned())
    }
}

/// Orders held in memory.
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<Order>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryOrderRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Every stored order in insertion order.
    pub fn snapshot(&self) -> Vec<Order> {
        lock(&self.orders).clone()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &NewOrder) -> Result<OrderId, OrderRepositoryError> {
        let mut orders = lock(&self.orders);
        let id = OrderId::new(i64::try_from(orders.len()).unwrap_or(i64::MAX) + 1);
        orders.push(Order {
            id,
            user_id: order.user_id,
            total_amount: order.total_amount,
            razorpay_order_id: order.razorpay_order_id.clone(),
            status: OrderStatus::Pending,
            razorpay_payment_id: None,
            created_at: self.clock.utc(),
            items: order
                .items
                .iter()
                .map(|item| OrderItem {
                    book_id: item.book_id,
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
        });
        Ok(id)
    }

    async fn complete(
        &self,
        user_id: UserId,
        order_id: OrderId,
        payment_id: &str,
    ) -> Result<bool, OrderRepositoryError> {
        let mut orders = lock(&self.orders);
        let Some(order) = orders
            .iter_mut()
            .find(|order| order.id == order_id && order.user_id == user_id)
        else {
            return Ok(false);
        };
        order.status = OrderStatus::Completed;
        order.razorpay_payment_id = Some(payment_id.to_owned());
        Ok(true)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderRepositoryError> {
        Ok(lock(&self.orders)
            .iter()
            .rev()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect())
    }
}
