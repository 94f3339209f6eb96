//! TypedRegistry - メッセージ型ごとの Handler の登録と管理
//!
//! # 学習ポイント
//! - HashMap<TypeId, Box<dyn Slot>> で型消去された slot を管理
//! - Generic methods での登録と型安全性（slot は `Any` で元の型に戻す）
//! - 登録・解除・重複排除は `HandlerRef` の等価性（identity bridge）で行う

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use super::handler::HandlerRef;
use super::identity::HandlerKey;
use super::message::{Message, short_type_name};

/// 1 つのメッセージ型の Handler 一覧（型消去版）
trait Slot: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn message_type(&self) -> &'static str;
    fn keys(&self) -> Vec<HandlerKey>;
    fn remove_key(&mut self, key: &HandlerKey) -> usize;
    fn len(&self) -> usize;
}

struct TypedSlot<M: Message> {
    handlers: Vec<HandlerRef<M>>,
}

impl<M: Message> TypedSlot<M> {
    fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<M: Message> Slot for TypedSlot<M> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn message_type(&self) -> &'static str {
        short_type_name::<M>()
    }

    fn keys(&self) -> Vec<HandlerKey> {
        self.handlers.iter().map(HandlerRef::key).collect()
    }

    fn remove_key(&mut self, key: &HandlerKey) -> usize {
        let before = self.handlers.len();
        self.handlers.retain(|handler| &handler.key() != key);
        before - self.handlers.len()
    }

    fn len(&self) -> usize {
        self.handlers.len()
    }
}

/// TypedRegistry はメッセージ型 → Handler 一覧を管理
///
/// # 使用例
/// ```ignore
/// let mut registry = TypedRegistry::new();
/// registry.subscribe::<OrderPlaced>(printer.widen());
///
/// let handlers = registry.handlers::<OrderPlaced>();
/// ```
///
/// # 内部実装
/// - メッセージ型ごとに登録順を保った `Vec<HandlerRef<M>>`
/// - 同じメッセージ型に「等しい」Handler は 1 つだけ（adapter で包んでも同じ扱い）
#[derive(Default)]
pub struct TypedRegistry {
    slots: HashMap<TypeId, Box<dyn Slot>>,
}

impl TypedRegistry {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// `M` の購読者として登録する
    ///
    /// 等しい Handler が既に `M` に登録済みなら何もせず `false`。
    pub fn subscribe<M: Message>(&mut self, handler: HandlerRef<M>) -> bool {
        let Some(slot) = self.slot_mut::<M>() else {
            return false;
        };
        if slot.handlers.contains(&handler) {
            return false;
        }
        slot.handlers.push(handler);
        true
    }

    /// `M` の購読を解除する（等価性で比較するので adapter でも素の Handler でもよい）
    pub fn unsubscribe<M: Message, N: Message>(&mut self, handler: &HandlerRef<N>) -> bool {
        let key = handler.key();
        let removed = match self.slots.get_mut(&TypeId::of::<M>()) {
            Some(slot) => slot.remove_key(&key) > 0,
            None => false,
        };
        self.drop_empty_slots();
        removed
    }

    /// 全てのメッセージ型から、この登録者を解除する
    pub fn unsubscribe_everywhere<N: Message>(&mut self, handler: &HandlerRef<N>) -> usize {
        let key = handler.key();
        let removed = self
            .slots
            .values_mut()
            .map(|slot| slot.remove_key(&key))
            .sum();
        self.drop_empty_slots();
        removed
    }

    /// `M` に登録された Handler（登録順）
    pub fn handlers<M: Message>(&self) -> Vec<HandlerRef<M>> {
        self.slots
            .get(&TypeId::of::<M>())
            .and_then(|slot| slot.as_any().downcast_ref::<TypedSlot<M>>())
            .map(|slot| slot.handlers.clone())
            .unwrap_or_default()
    }

    pub fn contains<M: Message, N: Message>(&self, handler: &HandlerRef<N>) -> bool {
        let key = handler.key();
        self.slots
            .get(&TypeId::of::<M>())
            .is_some_and(|slot| slot.keys().contains(&key))
    }

    pub fn has_subscribers(&self, message_type: TypeId) -> bool {
        self.slots
            .get(&message_type)
            .is_some_and(|slot| slot.len() > 0)
    }

    /// 登録者の数（同じ key は 1 人として数える）
    pub fn registrant_count(&self) -> usize {
        self.slots
            .values()
            .flat_map(|slot| slot.keys())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.slots.values().map(|slot| slot.message_type()).collect();
        types.sort_unstable();
        types
    }

    /// 登録の総数（メッセージ型ごとに数える）
    pub fn len(&self) -> usize {
        self.slots.values().map(|slot| slot.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot_mut<M: Message>(&mut self) -> Option<&mut TypedSlot<M>> {
        self.slots
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(TypedSlot::<M>::new()))
            .as_any_mut()
            .downcast_mut::<TypedSlot<M>>()
    }

    fn drop_empty_slots(&mut self) {
        self.slots.retain(|_, slot| slot.len() > 0);
    }
}
