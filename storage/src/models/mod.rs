mod chat_member;

pub use chat_member::ChatMember;
