//! In-memory storage for pets, orders and users.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use schema::{Inventory, Order, Pet, PetStatus, User};

/// One shared in-memory store backing all three contract services.
pub struct Petstore {
    pets: RwLock<HashMap<i64, Pet>>,
    next_pet_id: AtomicI64,
    orders: RwLock<HashMap<i64, Order>>,
    next_order_id: AtomicI64,
    users: RwLock<HashMap<String, User>>,
    next_user_id: AtomicI64,
}

impl Petstore {
    pub fn new() -> Self {
        Self {
            pets: RwLock::new(HashMap::new()),
            next_pet_id: AtomicI64::new(1),
            orders: RwLock::new(HashMap::new()),
            next_order_id: AtomicI64::new(1),
            users: RwLock::new(HashMap::new()),
            next_user_id: AtomicI64::new(1),
        }
    }

    /// Insert a pet, assigning an id when the caller left it unset.
    pub fn insert_pet(&self, mut pet: Pet) -> Pet {
        let id = match pet.id {
            Some(id) => id,
            None => self.next_pet_id.fetch_add(1, Ordering::SeqCst),
        };
        pet.id = Some(id);
        self.pets.write().unwrap().insert(id, pet.clone());
        pet
    }

    pub fn pet(&self, id: i64) -> Option<Pet> {
        self.pets.read().unwrap().get(&id).cloned()
    }

    /// Replace an existing pet by id. Returns false when the id is
    /// unset or unknown.
    pub fn replace_pet(&self, pet: Pet) -> bool {
        let Some(id) = pet.id else {
            return false;
        };
        let mut pets = self.pets.write().unwrap();
        if pets.contains_key(&id) {
            pets.insert(id, pet);
            true
        } else {
            false
        }
    }

    pub fn remove_pet(&self, id: i64) -> bool {
        self.pets.write().unwrap().remove(&id).is_some()
    }

    /// Pets whose status matches any of the given ones, ordered by id.
    pub fn pets_by_status(&self, statuses: &[PetStatus]) -> Vec<Pet> {
        let pets = self.pets.read().unwrap();
        let mut matches: Vec<Pet> = pets
            .values()
            .filter(|pet| pet.status.is_some_and(|s| statuses.contains(&s)))
            .cloned()
            .collect();
        matches.sort_by_key(|pet| pet.id);
        matches
    }

    /// First pet carrying every one of the given tags, lowest id first.
    pub fn first_pet_with_tags(&self, tags: &[String]) -> Option<Pet> {
        let pets = self.pets.read().unwrap();
        let mut matches: Vec<&Pet> = pets
            .values()
            .filter(|pet| {
                let pet_tags = pet.tags.as_deref().unwrap_or_default();
                tags.iter()
                    .all(|tag| pet_tags.iter().any(|t| &t.name == tag))
            })
            .collect();
        matches.sort_by_key(|pet| pet.id);
        matches.first().map(|pet| (*pet).clone())
    }

    /// Count pets per status. Statuses with no pets are omitted.
    pub fn inventory(&self) -> Inventory {
        let pets = self.pets.read().unwrap();
        let mut counts = Inventory::new();
        for pet in pets.values() {
            if let Some(status) = pet.status {
                *counts.entry(status.name().to_string()).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn insert_order(&self, mut order: Order) -> Order {
        let id = match order.id {
            Some(id) => id,
            None => self.next_order_id.fetch_add(1, Ordering::SeqCst),
        };
        order.id = Some(id);
        self.orders.write().unwrap().insert(id, order.clone());
        order
    }

    pub fn order(&self, id: i64) -> Option<Order> {
        self.orders.read().unwrap().get(&id).cloned()
    }

    pub fn remove_order(&self, id: i64) -> bool {
        self.orders.write().unwrap().remove(&id).is_some()
    }

    /// Insert a user keyed by username, assigning an id when unset.
    pub fn add_user(&self, mut user: User) -> User {
        if user.id.is_none() {
            user.id = Some(self.next_user_id.fetch_add(1, Ordering::SeqCst));
        }
        self.users
            .write()
            .unwrap()
            .insert(user.username.clone(), user.clone());
        user
    }

    pub fn user(&self, username: &str) -> Option<User> {
        self.users.read().unwrap().get(username).cloned()
    }

    /// Replace the user stored under `username`. Returns false when no
    /// such user exists.
    pub fn replace_user(&self, username: &str, user: User) -> bool {
        let mut users = self.users.write().unwrap();
        if users.contains_key(username) {
            users.remove(username);
            users.insert(user.username.clone(), user);
            true
        } else {
            false
        }
    }

    pub fn remove_user(&self, username: &str) -> bool {
        self.users.write().unwrap().remove(username).is_some()
    }
}

impl Default for Petstore {
    fn default() -> Self {
        Self::new()
    }
}
