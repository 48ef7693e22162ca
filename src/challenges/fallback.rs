use crate::models::Challenge;

/// Challenges shown when the backend cannot be reached.
pub fn mock_challenges() -> Vec<Challenge> {
    [
        (
            "1",
            "Morning Walk",
            "Take a 10-minute walk before starting your work day",
            20,
            "Cardio",
        ),
        (
            "2",
            "Desk Stretches",
            "Do 5 minutes of stretching at your desk",
            15,
            "Flexibility",
        ),
        (
            "3",
            "Stair Challenge",
            "Use stairs instead of elevator for the day",
            25,
            "Cardio",
        ),
        (
            "4",
            "Water Break",
            "Drink 8 glasses of water throughout the day",
            15,
            "Wellness",
        ),
        (
            "5",
            "Lunch Walk",
            "Take a 15-minute walk during your lunch break",
            20,
            "Cardio",
        ),
    ]
    .into_iter()
    .map(|(id, name, description, points, category)| Challenge {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        points,
        category: category.to_string(),
        completed: false,
        verification_photo: None,
    })
    .collect()
}
