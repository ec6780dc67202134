table! {
    answer_voter (user_id, answer_id) {
        user_id -> Int4,
        answer_id -> Int4,
    }
}

table! {
    answers (id) {
        id -> Int4,
        content -> Text,
        create_date -> Timestamptz,
        modify_date -> Nullable<Timestamptz>,
        question_id -> Int4,
        user_id -> Nullable<Int4>,
    }
}

table! {
    question_voter (user_id, question_id) {
        user_id -> Int4,
        question_id -> Int4,
    }
}

table! {
    questions (id) {
        id -> Int4,
        subject -> Varchar,
        content -> Text,
        create_date -> Timestamptz,
        modify_date -> Nullable<Timestamptz>,
        user_id -> Nullable<Int4>,
    }
}

table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
        password -> Varchar,
        email -> Varchar,
    }
}

joinable!(answer_voter -> answers (answer_id));
joinable!(answer_voter -> users (user_id));
joinable!(answers -> questions (question_id));
joinable!(answers -> users (user_id));
joinable!(question_voter -> questions (question_id));
joinable!(question_voter -> users (user_id));
joinable!(questions -> users (user_id));

allow_tables_to_appear_in_same_query!(
    answer_voter,
    answers,
    question_voter,
    questions,
    users,
);
