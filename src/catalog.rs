/// Titles fetched to build the dataset on first run
pub const SEED_TITLES: &[&str] = &[
    "Inception",
    "The Matrix",
    "Interstellar",
    "The Dark Knight",
    "Pulp Fiction",
    "Forrest Gump",
    "The Shawshank Redemption",
    "Fight Club",
    "The Godfather",
    "The Godfather Part II",
    "The Lord of the Rings: The Fellowship of the Ring",
    "The Lord of the Rings: The Two Towers",
    "The Lord of the Rings: The Return of the King",
    "Star Wars: Episode IV - A New Hope",
    "Star Wars: Episode V - The Empire Strikes Back",
    "Star Wars: Episode VI - Return of the Jedi",
    "The Avengers",
    "Avengers: Endgame",
    "Iron Man",
    "Iron Man 2",
    "Iron Man 3",
    "Black Panther",
    "Captain America: The First Avenger",
    "Captain America: The Winter Soldier",
    "Captain America: Civil War",
    "Guardians of the Galaxy",
    "Guardians of the Galaxy Vol. 2",
    "Thor",
    "Thor: Ragnarok",
    "Spider-Man: Homecoming",
    "Spider-Man: Far From Home",
    "Doctor Strange",
    "Ant-Man",
    "Ant-Man and the Wasp",
    "The Lion King",
    "Aladdin",
    "Frozen",
    "Frozen II",
    "Beauty and the Beast",
    "Cinderella",
    "Mulan",
    "Toy Story",
    "Toy Story 2",
    "Toy Story 3",
    "Toy Story 4",
    "Finding Nemo",
    "Finding Dory",
    "Up",
    "Wall-E",
    "Coco",
    "Inside Out",
    "Soul",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_titles_are_unique_and_non_blank() {
        let unique: HashSet<&str> = SEED_TITLES.iter().copied().collect();
        assert_eq!(unique.len(), SEED_TITLES.len());
        assert!(SEED_TITLES.iter().all(|title| !title.trim().is_empty()));
    }
}
