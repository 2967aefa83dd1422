// Database schema for the donor registry
diesel::table! {
    donors (id) {
        id -> Text,                     // UUID, hyphenated
        name -> Text,
        gender -> Text,                 // Male, Female, Other
        age -> Integer,
        blood_type -> Text,             // A+, A-, B+, B-, AB+, AB-, O+, O-
        weight -> Double,               // kg
        location -> Text,
        latitude -> Nullable<Double>,
        longitude -> Nullable<Double>,
        contact -> Text,                // +<country code><number>, unique
        email -> Nullable<Text>,
        health_issues -> Nullable<Text>,
        notes -> Nullable<Text>,
        last_donation -> Nullable<Date>,
        available -> Bool,
        created_at -> Timestamp,        // UTC
    }
}
